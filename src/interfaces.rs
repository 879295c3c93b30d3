pub mod handlers;
pub mod pages;
pub mod repositories;
pub mod routes;
pub mod templates;
