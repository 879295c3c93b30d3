pub mod book;
pub mod quote;
pub mod review;
pub mod sqlx_repo;
