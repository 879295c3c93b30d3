use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::quote::{QuotePatch, QuoteReplace, QuoteRequest},
    errors::AppError,
    AppState,
};

#[instrument(skip(state))]
pub async fn list_quotes(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let quotes = state.quote_handler.list_quotes().await?;
    Ok(HttpResponse::Ok().json(quotes))
}

#[instrument(skip(state, data))]
pub async fn create_quote(
    state: web::Data<AppState>,
    data: web::Json<QuoteRequest>,
) -> Result<impl Responder, AppError> {
    let quote = state.quote_handler.create_quote(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(quote))
}

#[instrument(skip(state))]
pub async fn get_quote(
    quote_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let quote = state.quote_handler.get_quote(&quote_id).await?;
    Ok(HttpResponse::Ok().json(quote))
}

#[instrument(skip(state, data))]
pub async fn update_quote(
    quote_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<QuoteReplace>,
) -> Result<impl Responder, AppError> {
    let quote = state.quote_handler.update_quote(&quote_id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(quote))
}

#[instrument(skip(state, data))]
pub async fn patch_quote(
    quote_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<QuotePatch>,
) -> Result<impl Responder, AppError> {
    let quote = state.quote_handler.patch_quote(&quote_id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(quote))
}

#[instrument(skip(state))]
pub async fn delete_quote(
    quote_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.quote_handler.delete_quote(&quote_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Looks up the author on Wikipedia and stores the summary on the quote.
#[instrument(skip(state))]
pub async fn fetch_author_bio(
    quote_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let response = state.quote_handler.fetch_author_bio(&quote_id).await?;
    Ok(HttpResponse::Ok().json(response))
}
