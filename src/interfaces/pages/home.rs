use actix_web::web;
use tracing::instrument;

use crate::{
    pages::response::{page_error, NoticeQuery, PageResponse},
    templates::home::home_page,
    AppState,
};

const RECENT_QUOTES: i64 = 5;

#[instrument(skip(state))]
pub async fn home(state: web::Data<AppState>, query: web::Query<NoticeQuery>) -> PageResponse {
    match state.quote_handler.list_recent_quotes(RECENT_QUOTES).await {
        Ok(quotes) => PageResponse::html(home_page(&quotes, query.into_inner().into_notice().as_ref())),
        Err(e) => page_error(e),
    }
}
