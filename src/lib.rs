use sqlx::PgPool;
use url::Url;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, pages, repositories, routes, templates};
pub use infrastructure::{db, storage, utils, wikipedia};

use errors::AppError;
use repositories::sqlx_repo::{SqlxBookRepo, SqlxQuoteRepo, SqlxReviewRepo};
use storage::cover_store::LocalCoverStore;
use use_cases::{book::BookHandler, quote::QuoteHandler, review::ReviewHandler};
use wikipedia::client::WikipediaClient;

pub type AppQuoteHandler = QuoteHandler<SqlxQuoteRepo, WikipediaClient>;
pub type AppBookHandler = BookHandler<SqlxBookRepo, LocalCoverStore>;
pub type AppReviewHandler = ReviewHandler<SqlxReviewRepo>;

pub struct AppState {
    pub quote_handler: AppQuoteHandler,
    pub book_handler: AppBookHandler,
    pub review_handler: AppReviewHandler,
    pub media_store: LocalCoverStore,
    pub public_base_url: Option<Url>,
    pub db_pool: PgPool,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: PgPool) -> Result<Self, AppError> {
        let bio_client = WikipediaClient::from_config(config)?;
        let cover_store = LocalCoverStore::from_config(config);

        let quote_handler = QuoteHandler::new(SqlxQuoteRepo::new(pool.clone()), bio_client);
        let book_handler = BookHandler::new(
            SqlxBookRepo::new(pool.clone()),
            cover_store.clone(),
            config.media_url.clone(),
        );
        let review_handler = ReviewHandler::new(SqlxReviewRepo::new(pool.clone()));

        Ok(AppState {
            quote_handler,
            book_handler,
            review_handler,
            media_store: cover_store,
            public_base_url: config.public_base_url(),
            db_pool: pool,
        })
    }
}
