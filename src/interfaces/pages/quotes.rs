use actix_web::{http::StatusCode, web};
use tracing::instrument;

use crate::{
    entities::quote::{Quote, QuoteForm},
    errors::AppError,
    pages::response::{is_form_error, page_error, Notice, NoticeQuery, PageResponse},
    templates::quotes::{detail_page, form_page, list_page},
    AppState,
};

fn detail_url(quote: &Quote) -> String {
    format!("/quotes/{}", quote.id)
}

fn form_failure(heading: &str, action: &str, form: &QuoteForm, err: AppError) -> PageResponse {
    if is_form_error(&err) {
        let notice = Notice::error(err.message());
        PageResponse::html_with_status(StatusCode::BAD_REQUEST, form_page(heading, action, form, Some(&notice)))
    } else {
        page_error(err)
    }
}

#[instrument(skip(state))]
pub async fn list_quotes(state: web::Data<AppState>, query: web::Query<NoticeQuery>) -> PageResponse {
    match state.quote_handler.list_quotes().await {
        Ok(quotes) => PageResponse::html(list_page(&quotes, query.into_inner().into_notice().as_ref())),
        Err(e) => page_error(e),
    }
}

#[instrument(skip(state))]
pub async fn quote_detail(
    quote_id: web::Path<String>,
    state: web::Data<AppState>,
    query: web::Query<NoticeQuery>,
) -> PageResponse {
    match state.quote_handler.get_quote(&quote_id).await {
        Ok(quote) => PageResponse::html(detail_page(&quote, query.into_inner().into_notice().as_ref())),
        Err(e) => page_error(e),
    }
}

pub async fn new_quote_form() -> PageResponse {
    PageResponse::html(form_page("Add a quote", "/quotes/create", &QuoteForm::default(), None))
}

#[instrument(skip(state, form))]
pub async fn create_quote(state: web::Data<AppState>, form: web::Form<QuoteForm>) -> PageResponse {
    let form = form.into_inner();

    let result = match form.clone().into_request() {
        Ok(request) => state.quote_handler.create_quote(request).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(quote) => PageResponse::redirect_with(&detail_url(&quote), Notice::success("Quote created successfully!")),
        Err(e) => form_failure("Add a quote", "/quotes/create", &form, e),
    }
}

#[instrument(skip(state))]
pub async fn edit_quote_form(quote_id: web::Path<String>, state: web::Data<AppState>) -> PageResponse {
    match state.quote_handler.get_quote(&quote_id).await {
        Ok(quote) => {
            let action = format!("{}/edit", detail_url(&quote));
            PageResponse::html(form_page("Edit quote", &action, &QuoteForm::from(&quote), None))
        }
        Err(e) => page_error(e),
    }
}

#[instrument(skip(state, form))]
pub async fn update_quote(
    quote_id: web::Path<String>,
    state: web::Data<AppState>,
    form: web::Form<QuoteForm>,
) -> PageResponse {
    let quote = match state.quote_handler.get_quote(&quote_id).await {
        Ok(quote) => quote,
        Err(e) => return page_error(e),
    };
    let action = format!("{}/edit", detail_url(&quote));
    let form = form.into_inner();

    let result = match form.clone().into_patch() {
        Ok(patch) => state.quote_handler.patch_quote(&quote_id, patch).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(quote) => PageResponse::redirect_with(&detail_url(&quote), Notice::success("Quote updated successfully!")),
        Err(e) => form_failure("Edit quote", &action, &form, e),
    }
}

/// GET on the delete URL never deletes.
pub async fn delete_quote_redirect(quote_id: web::Path<String>) -> PageResponse {
    PageResponse::redirect(format!("/quotes/{}", quote_id.as_str()))
}

#[instrument(skip(state))]
pub async fn delete_quote(quote_id: web::Path<String>, state: web::Data<AppState>) -> PageResponse {
    match state.quote_handler.delete_quote(&quote_id).await {
        Ok(()) => PageResponse::redirect_with("/quotes", Notice::success("Quote deleted successfully!")),
        Err(e) => page_error(e),
    }
}

pub async fn fetch_bio_redirect(quote_id: web::Path<String>) -> PageResponse {
    PageResponse::redirect(format!("/quotes/{}", quote_id.as_str()))
}

/// Runs the bio lookup and reports the outcome as a notice on the detail page.
#[instrument(skip(state))]
pub async fn fetch_author_bio(quote_id: web::Path<String>, state: web::Data<AppState>) -> PageResponse {
    let quote = match state.quote_handler.get_quote(&quote_id).await {
        Ok(quote) => quote,
        Err(e) => return page_error(e),
    };

    let notice = match state.quote_handler.fetch_author_bio(&quote_id).await {
        Ok(_) => Notice::success(format!("Successfully fetched bio for {}!", quote.author)),
        Err(AppError::InternalError(msg)) => {
            tracing::error!("Bio fetch failed: {}", msg);
            Notice::error("Error fetching bio: internal server error")
        }
        Err(e) => Notice::error(e.message()),
    };

    PageResponse::redirect_with(&detail_url(&quote), notice)
}
