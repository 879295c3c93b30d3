use actix_web::web;

use crate::handlers::reports;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/reporting-quote-counts")
            .route(web::get().to(reports::quote_counts_by_era))
    );
}
