pub mod book;
pub mod extractors;
pub mod quote;
pub mod review;
