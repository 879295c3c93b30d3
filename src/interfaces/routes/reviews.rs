use actix_web::web;

use crate::handlers::reviews;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reviews")
            .service(
                web::resource("")
                    .route(web::get().to(reviews::list_reviews))
                    .route(web::post().to(reviews::create_review))
            )
            .service(
                web::resource("/{review_id}")
                    .route(web::get().to(reviews::get_review))
                    .route(web::put().to(reviews::update_review))
                    .route(web::patch().to(reviews::patch_review))
                    .route(web::delete().to(reviews::delete_review))
            )
    );
}
