use actix_web::web;

use crate::handlers::quotes;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/quotes")
            .service(
                web::resource("")
                    .route(web::get().to(quotes::list_quotes))
                    .route(web::post().to(quotes::create_quote))
            )
            .service(
                web::resource("/{quote_id}")
                    .route(web::get().to(quotes::get_quote))
                    .route(web::put().to(quotes::update_quote))
                    .route(web::patch().to(quotes::patch_quote))
                    .route(web::delete().to(quotes::delete_quote))
            )
            .service(
                web::resource("/{quote_id}/fetch-bio")
                    .route(web::post().to(quotes::fetch_author_bio))
            )
    );
}
