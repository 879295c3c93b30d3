use actix_web::{http::StatusCode, web};
use tracing::instrument;

use crate::{
    entities::{
        book::BookResponse,
        review::{Review, ReviewForm},
    },
    errors::AppError,
    pages::response::{is_form_error, page_error, Notice, PageResponse},
    templates::reviews::form_page,
    use_cases::extractors::RequestBaseUrl,
    AppState,
};

fn book_url(book_id: i64) -> String {
    format!("/books/{}", book_id)
}

fn form_failure(heading: &str, action: &str, book: &BookResponse, form: &ReviewForm, err: AppError) -> PageResponse {
    if is_form_error(&err) {
        let notice = Notice::error(err.message());
        PageResponse::html_with_status(
            StatusCode::BAD_REQUEST,
            form_page(heading, action, book, form, Some(&notice)),
        )
    } else {
        page_error(err)
    }
}

/// Loads a review together with the book it belongs to.
async fn review_with_book(
    state: &AppState,
    review_id: &str,
    base_url: &RequestBaseUrl,
) -> Result<(Review, BookResponse), AppError> {
    let review = state.review_handler.get_review(review_id).await?;
    let book = state.book_handler
        .get_book(&review.book_id.to_string(), base_url.url())
        .await?;
    Ok((review, book))
}

#[instrument(skip(state, base_url))]
pub async fn new_review_form(
    book_id: web::Path<String>,
    state: web::Data<AppState>,
    base_url: RequestBaseUrl,
) -> PageResponse {
    match state.book_handler.get_book(&book_id, base_url.url()).await {
        Ok(book) => {
            let action = format!("{}/reviews/create", book_url(book.id));
            PageResponse::html(form_page("Write a review", &action, &book, &ReviewForm::default(), None))
        }
        Err(e) => page_error(e),
    }
}

#[instrument(skip(state, base_url, form))]
pub async fn create_review(
    book_id: web::Path<String>,
    state: web::Data<AppState>,
    base_url: RequestBaseUrl,
    form: web::Form<ReviewForm>,
) -> PageResponse {
    let book = match state.book_handler.get_book(&book_id, base_url.url()).await {
        Ok(book) => book,
        Err(e) => return page_error(e),
    };
    let action = format!("{}/reviews/create", book_url(book.id));
    let form = form.into_inner();

    let result = match form.clone().into_request(book.id) {
        Ok(request) => state.review_handler.create_review(request).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(review) => PageResponse::redirect_with(&book_url(review.book_id), Notice::success("Review created successfully!")),
        Err(e) => form_failure("Write a review", &action, &book, &form, e),
    }
}

#[instrument(skip(state, base_url))]
pub async fn edit_review_form(
    review_id: web::Path<String>,
    state: web::Data<AppState>,
    base_url: RequestBaseUrl,
) -> PageResponse {
    match review_with_book(&state, &review_id, &base_url).await {
        Ok((review, book)) => {
            let action = format!("/reviews/{}/edit", review.id);
            PageResponse::html(form_page("Edit review", &action, &book, &ReviewForm::from(&review), None))
        }
        Err(e) => page_error(e),
    }
}

#[instrument(skip(state, base_url, form))]
pub async fn update_review(
    review_id: web::Path<String>,
    state: web::Data<AppState>,
    base_url: RequestBaseUrl,
    form: web::Form<ReviewForm>,
) -> PageResponse {
    let (review, book) = match review_with_book(&state, &review_id, &base_url).await {
        Ok(found) => found,
        Err(e) => return page_error(e),
    };
    let action = format!("/reviews/{}/edit", review.id);
    let form = form.into_inner();

    let result = match form.clone().into_request(review.book_id) {
        Ok(request) => state.review_handler.update_review(&review_id, request).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(updated) => PageResponse::redirect_with(&book_url(updated.book_id), Notice::success("Review updated successfully!")),
        Err(e) => form_failure("Edit review", &action, &book, &form, e),
    }
}

/// GET on the delete URL only sends the visitor back to the book.
#[instrument(skip(state))]
pub async fn delete_review_redirect(review_id: web::Path<String>, state: web::Data<AppState>) -> PageResponse {
    match state.review_handler.get_review(&review_id).await {
        Ok(review) => PageResponse::redirect(book_url(review.book_id)),
        Err(e) => page_error(e),
    }
}

#[instrument(skip(state))]
pub async fn delete_review(review_id: web::Path<String>, state: web::Data<AppState>) -> PageResponse {
    let review = match state.review_handler.get_review(&review_id).await {
        Ok(review) => review,
        Err(e) => return page_error(e),
    };

    match state.review_handler.delete_review(&review_id).await {
        Ok(()) => PageResponse::redirect_with(&book_url(review.book_id), Notice::success("Review deleted successfully!")),
        Err(e) => page_error(e),
    }
}
