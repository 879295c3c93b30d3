use actix_web::{http::header, web, HttpResponse};
use tokio::fs;
use tracing::instrument;

use crate::{errors::AppError, AppState};

/// Serves a stored upload from the media root.
#[instrument(skip(state))]
pub async fn serve_media(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let not_found = || AppError::NotFound(format!("Media file {} not found", path.as_str()));

    let file_path = state.media_store.resolve(&path).ok_or_else(not_found)?;

    let bytes = match fs::read(&file_path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
        Err(e) => return Err(e.into()),
    };

    let content_type = infer::get(&bytes)
        .map(|kind| kind.mime_type())
        .unwrap_or("application/octet-stream");

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, content_type))
        .insert_header((header::CACHE_CONTROL, "public, max-age=86400"))
        .body(bytes))
}
