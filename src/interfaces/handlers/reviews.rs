use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::review::{ReviewFilter, ReviewPatch, ReviewRequest},
    errors::AppError,
    AppState,
};

#[instrument(skip(state))]
pub async fn list_reviews(
    state: web::Data<AppState>,
    filter: web::Query<ReviewFilter>,
) -> Result<impl Responder, AppError> {
    let reviews = state.review_handler.list_reviews(filter.book_id).await?;
    Ok(HttpResponse::Ok().json(reviews))
}

#[instrument(skip(state, data))]
pub async fn create_review(
    state: web::Data<AppState>,
    data: web::Json<ReviewRequest>,
) -> Result<impl Responder, AppError> {
    let review = state.review_handler.create_review(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(review))
}

#[instrument(skip(state))]
pub async fn get_review(
    review_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let review = state.review_handler.get_review(&review_id).await?;
    Ok(HttpResponse::Ok().json(review))
}

#[instrument(skip(state, data))]
pub async fn update_review(
    review_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<ReviewRequest>,
) -> Result<impl Responder, AppError> {
    let review = state.review_handler.update_review(&review_id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(review))
}

#[instrument(skip(state, data))]
pub async fn patch_review(
    review_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<ReviewPatch>,
) -> Result<impl Responder, AppError> {
    let review = state.review_handler.patch_review(&review_id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(review))
}

#[instrument(skip(state))]
pub async fn delete_review(
    review_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.review_handler.delete_review(&review_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
