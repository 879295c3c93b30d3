pub mod books;
pub mod home;
pub mod layout;
pub mod quotes;
pub mod reviews;
