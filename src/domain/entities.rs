pub mod book;
pub mod option_fields;
pub mod quote;
pub mod report;
pub mod review;
