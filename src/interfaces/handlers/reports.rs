use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{errors::AppError, AppState};

/// Number of quotes per era, largest group first; unclassified quotes report `era: null`.
#[instrument(skip(state))]
pub async fn quote_counts_by_era(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let report = state.quote_handler.era_report().await?;
    Ok(HttpResponse::Ok().json(report))
}
