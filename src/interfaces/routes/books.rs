use actix_web::web;

use crate::handlers::books;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/books")
            .service(
                web::resource("")
                    .route(web::get().to(books::list_books))
                    .route(web::post().to(books::create_book))
            )
            .service(
                web::resource("/{book_id}")
                    .route(web::get().to(books::get_book))
                    .route(web::put().to(books::update_book))
                    .route(web::patch().to(books::patch_book))
                    .route(web::delete().to(books::delete_book))
            )
    );
}
