use actix_multipart::form::{tempfile::TempFile, MultipartForm};
use actix_web::{web, Either, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::book::{BookPatch, BookRequest, BookUpload, CoverUpload},
    errors::AppError,
    use_cases::extractors::RequestBaseUrl,
    AppState,
};

type BookPayload = Result<Either<MultipartForm<BookUpload>, web::Json<BookRequest>>, actix_web::Error>;
type BookPatchPayload = Result<Either<MultipartForm<BookUpload>, web::Json<BookPatch>>, actix_web::Error>;

/// Book fields plus the temporary cover file, which must stay alive until stored.
struct BookInput<T> {
    fields: T,
    cover_file: Option<TempFile>,
}

impl<T> BookInput<T> {
    fn cover(&self) -> Option<CoverUpload> {
        self.cover_file.as_ref().and_then(CoverUpload::from_temp_file)
    }
}

fn unsupported_payload(err: actix_web::Error) -> AppError {
    AppError::InvalidInput(format!(
        "Request body could not be read as application/json or multipart/form-data: {}",
        err
    ))
}

fn full_input(payload: BookPayload) -> Result<BookInput<BookRequest>, AppError> {
    match payload.map_err(unsupported_payload)? {
        Either::Left(form) => {
            let (patch, cover_file) = form.into_inner().into_parts();
            // blank values are rejected by validation with a per-field message
            let fields = BookRequest {
                title: patch.title.unwrap_or_default(),
                author: patch.author.unwrap_or_default(),
            };
            Ok(BookInput { fields, cover_file })
        }
        Either::Right(json) => Ok(BookInput {
            fields: json.into_inner(),
            cover_file: None,
        }),
    }
}

fn partial_input(payload: BookPatchPayload) -> Result<BookInput<BookPatch>, AppError> {
    match payload.map_err(unsupported_payload)? {
        Either::Left(form) => {
            let (fields, cover_file) = form.into_inner().into_parts();
            Ok(BookInput { fields, cover_file })
        }
        Either::Right(json) => Ok(BookInput {
            fields: json.into_inner(),
            cover_file: None,
        }),
    }
}

#[instrument(skip(state, base_url))]
pub async fn list_books(
    state: web::Data<AppState>,
    base_url: RequestBaseUrl,
) -> Result<impl Responder, AppError> {
    let books = state.book_handler.list_books(base_url.url()).await?;
    Ok(HttpResponse::Ok().json(books))
}

/// Accepts JSON, or multipart with an optional `cover_image` file part.
#[instrument(skip(state, base_url, payload))]
pub async fn create_book(
    state: web::Data<AppState>,
    base_url: RequestBaseUrl,
    payload: BookPayload,
) -> Result<impl Responder, AppError> {
    let input = full_input(payload)?;
    let cover = input.cover();

    let book = state.book_handler
        .create_book(input.fields, cover, base_url.url())
        .await?;

    Ok(HttpResponse::Created().json(book))
}

#[instrument(skip(state, base_url))]
pub async fn get_book(
    book_id: web::Path<String>,
    state: web::Data<AppState>,
    base_url: RequestBaseUrl,
) -> Result<impl Responder, AppError> {
    let book = state.book_handler.get_book(&book_id, base_url.url()).await?;
    Ok(HttpResponse::Ok().json(book))
}

#[instrument(skip(state, base_url, payload))]
pub async fn update_book(
    book_id: web::Path<String>,
    state: web::Data<AppState>,
    base_url: RequestBaseUrl,
    payload: BookPayload,
) -> Result<impl Responder, AppError> {
    let input = full_input(payload)?;
    let cover = input.cover();

    let book = state.book_handler
        .update_book(&book_id, input.fields, cover, base_url.url())
        .await?;

    Ok(HttpResponse::Ok().json(book))
}

#[instrument(skip(state, base_url, payload))]
pub async fn patch_book(
    book_id: web::Path<String>,
    state: web::Data<AppState>,
    base_url: RequestBaseUrl,
    payload: BookPatchPayload,
) -> Result<impl Responder, AppError> {
    let input = partial_input(payload)?;
    let cover = input.cover();

    let book = state.book_handler
        .patch_book(&book_id, input.fields, cover, base_url.url())
        .await?;

    Ok(HttpResponse::Ok().json(book))
}

/// Deletes the book together with its reviews.
#[instrument(skip(state))]
pub async fn delete_book(
    book_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.book_handler.delete_book(&book_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
