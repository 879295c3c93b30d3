pub mod books;
pub mod home;
pub mod quotes;
pub mod response;
pub mod reviews;
