use actix_web::web;

use crate::pages::{books, home, quotes, reviews};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(home::home)));

    cfg.service(
        web::scope("/quotes")
            .service(web::resource("").route(web::get().to(quotes::list_quotes)))
            .service(
                web::resource("/create")
                    .route(web::get().to(quotes::new_quote_form))
                    .route(web::post().to(quotes::create_quote))
            )
            .service(web::resource("/{quote_id}").route(web::get().to(quotes::quote_detail)))
            .service(
                web::resource("/{quote_id}/edit")
                    .route(web::get().to(quotes::edit_quote_form))
                    .route(web::post().to(quotes::update_quote))
            )
            .service(
                web::resource("/{quote_id}/delete")
                    .route(web::get().to(quotes::delete_quote_redirect))
                    .route(web::post().to(quotes::delete_quote))
            )
            .service(
                web::resource("/{quote_id}/fetch-bio")
                    .route(web::get().to(quotes::fetch_bio_redirect))
                    .route(web::post().to(quotes::fetch_author_bio))
            )
    );

    cfg.service(
        web::scope("/books")
            .service(web::resource("").route(web::get().to(books::list_books)))
            .service(
                web::resource("/create")
                    .route(web::get().to(books::new_book_form))
                    .route(web::post().to(books::create_book))
            )
            .service(web::resource("/{book_id}").route(web::get().to(books::book_detail)))
            .service(
                web::resource("/{book_id}/edit")
                    .route(web::get().to(books::edit_book_form))
                    .route(web::post().to(books::update_book))
            )
            .service(
                web::resource("/{book_id}/delete")
                    .route(web::get().to(books::delete_book_redirect))
                    .route(web::post().to(books::delete_book))
            )
            .service(
                web::resource("/{book_id}/reviews/create")
                    .route(web::get().to(reviews::new_review_form))
                    .route(web::post().to(reviews::create_review))
            )
    );

    cfg.service(
        web::scope("/reviews")
            .service(
                web::resource("/{review_id}/edit")
                    .route(web::get().to(reviews::edit_review_form))
                    .route(web::post().to(reviews::update_review))
            )
            .service(
                web::resource("/{review_id}/delete")
                    .route(web::get().to(reviews::delete_review_redirect))
                    .route(web::post().to(reviews::delete_review))
            )
    );
}
