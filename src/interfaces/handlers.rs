pub mod books;
pub mod media;
pub mod quotes;
pub mod reports;
pub mod reviews;
pub mod system;
