use actix_multipart::form::MultipartForm;
use actix_web::{http::StatusCode, web};
use tracing::{instrument, warn};

use crate::{
    entities::book::{BookPatch, BookResponse, BookUpload, CoverUpload},
    errors::AppError,
    pages::response::{is_form_error, page_error, Notice, NoticeQuery, PageResponse},
    templates::books::{detail_page, form_page, list_page},
    use_cases::extractors::RequestBaseUrl,
    AppState,
};

fn detail_url(book_id: i64) -> String {
    format!("/books/{}", book_id)
}

fn form_failure(
    heading: &str,
    action: &str,
    form: &BookPatch,
    current_cover: Option<&str>,
    err: AppError,
) -> PageResponse {
    if is_form_error(&err) {
        let notice = Notice::error(err.message());
        PageResponse::html_with_status(
            StatusCode::BAD_REQUEST,
            form_page(heading, action, form, current_cover, Some(&notice)),
        )
    } else {
        page_error(err)
    }
}

/// Re-renders the form when the multipart body itself was rejected,
/// usually because it exceeded the upload limit.
fn unreadable_form(
    state: &AppState,
    heading: &str,
    action: &str,
    form: &BookPatch,
    current_cover: Option<&str>,
    err: actix_web::Error,
) -> PageResponse {
    warn!(error = %err, "Rejected book form");
    let notice = Notice::error(format!(
        "The form could not be read. Cover images must be at most {} bytes.",
        state.media_store.max_bytes()
    ));
    PageResponse::html_with_status(
        StatusCode::BAD_REQUEST,
        form_page(heading, action, form, current_cover, Some(&notice)),
    )
}

fn edit_values(book: &BookResponse) -> BookPatch {
    BookPatch {
        title: Some(book.title.clone()),
        author: Some(book.author.clone()),
    }
}

#[instrument(skip(state, base_url))]
pub async fn list_books(
    state: web::Data<AppState>,
    base_url: RequestBaseUrl,
    query: web::Query<NoticeQuery>,
) -> PageResponse {
    match state.book_handler.list_books(base_url.url()).await {
        Ok(books) => PageResponse::html(list_page(&books, query.into_inner().into_notice().as_ref())),
        Err(e) => page_error(e),
    }
}

#[instrument(skip(state, base_url))]
pub async fn book_detail(
    book_id: web::Path<String>,
    state: web::Data<AppState>,
    base_url: RequestBaseUrl,
    query: web::Query<NoticeQuery>,
) -> PageResponse {
    match state.book_handler.get_book(&book_id, base_url.url()).await {
        Ok(book) => PageResponse::html(detail_page(&book, query.into_inner().into_notice().as_ref())),
        Err(e) => page_error(e),
    }
}

pub async fn new_book_form() -> PageResponse {
    PageResponse::html(form_page("Add a book", "/books/create", &BookPatch::default(), None, None))
}

#[instrument(skip(state, base_url, form))]
pub async fn create_book(
    state: web::Data<AppState>,
    base_url: RequestBaseUrl,
    form: Result<MultipartForm<BookUpload>, actix_web::Error>,
) -> PageResponse {
    let form = match form {
        Ok(form) => form,
        Err(e) => return unreadable_form(&state, "Add a book", "/books/create", &BookPatch::default(), None, e),
    };
    let (values, cover_file) = form.into_inner().into_parts();
    let cover = cover_file.as_ref().and_then(CoverUpload::from_temp_file);

    let result = match values.clone().require_all() {
        Ok(request) => state.book_handler.create_book(request, cover, base_url.url()).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(book) => PageResponse::redirect_with(&detail_url(book.id), Notice::success("Book created successfully!")),
        Err(e) => form_failure("Add a book", "/books/create", &values, None, e),
    }
}

#[instrument(skip(state, base_url))]
pub async fn edit_book_form(
    book_id: web::Path<String>,
    state: web::Data<AppState>,
    base_url: RequestBaseUrl,
) -> PageResponse {
    match state.book_handler.get_book(&book_id, base_url.url()).await {
        Ok(book) => {
            let action = format!("{}/edit", detail_url(book.id));
            PageResponse::html(form_page(
                "Edit book",
                &action,
                &edit_values(&book),
                book.cover_image_url.as_deref(),
                None,
            ))
        }
        Err(e) => page_error(e),
    }
}

/// A new upload replaces the cover; an empty file input keeps the current one.
#[instrument(skip(state, base_url, form))]
pub async fn update_book(
    book_id: web::Path<String>,
    state: web::Data<AppState>,
    base_url: RequestBaseUrl,
    form: Result<MultipartForm<BookUpload>, actix_web::Error>,
) -> PageResponse {
    let book = match state.book_handler.get_book(&book_id, base_url.url()).await {
        Ok(book) => book,
        Err(e) => return page_error(e),
    };
    let action = format!("{}/edit", detail_url(book.id));

    let form = match form {
        Ok(form) => form,
        Err(e) => {
            let current_cover = book.cover_image_url.as_deref();
            return unreadable_form(&state, "Edit book", &action, &edit_values(&book), current_cover, e);
        }
    };
    let (values, cover_file) = form.into_inner().into_parts();
    let cover = cover_file.as_ref().and_then(CoverUpload::from_temp_file);

    let result = match values.clone().require_all() {
        Ok(request) => state.book_handler.update_book(&book_id, request, cover, base_url.url()).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(updated) => PageResponse::redirect_with(&detail_url(updated.id), Notice::success("Book updated successfully!")),
        Err(e) => form_failure("Edit book", &action, &values, book.cover_image_url.as_deref(), e),
    }
}

pub async fn delete_book_redirect(book_id: web::Path<String>) -> PageResponse {
    PageResponse::redirect(format!("/books/{}", book_id.as_str()))
}

#[instrument(skip(state))]
pub async fn delete_book(book_id: web::Path<String>, state: web::Data<AppState>) -> PageResponse {
    match state.book_handler.delete_book(&book_id).await {
        Ok(()) => PageResponse::redirect_with("/books", Notice::success("Book deleted successfully!")),
        Err(e) => page_error(e),
    }
}
