use actix_web::web;

use crate::handlers::system;

mod books;
mod json_error;
mod media;
mod pages;
mod quotes;
mod reports;
mod reviews;

pub use media::config_routes as configure_media;

/// Registers the JSON API under `/api` and the HTML pages at the root.
/// Media serving is registered separately with [`configure_media`].
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(web::resource("").route(web::get().to(system::api_root)))
            .service(web::resource("/health").route(web::get().to(system::health_check)))
            .configure(quotes::config_routes)
            .configure(reports::config_routes)
            .configure(books::config_routes)
            .configure(reviews::config_routes)
    );

    cfg.configure(pages::config_routes);
    cfg.configure(json_error::config_routes);
}
