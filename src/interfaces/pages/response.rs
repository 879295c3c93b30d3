use actix_web::{
    body::BoxBody,
    http::{header, StatusCode},
    HttpRequest, HttpResponse, Responder,
};
use serde::Deserialize;

use crate::{errors::AppError, templates::layout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Error => "error",
        }
    }
}

/// One-shot message shown on the page a form submission lands on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Error, message: message.into() }
    }
}

/// `?notice=<level>&message=<text>` as written by [`PageResponse::redirect_with`].
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
    pub message: Option<String>,
}

impl NoticeQuery {
    pub fn into_notice(self) -> Option<Notice> {
        let level = match self.notice.as_deref()? {
            "success" => NoticeLevel::Success,
            "error" => NoticeLevel::Error,
            _ => return None,
        };
        let message = self.message.filter(|m| !m.trim().is_empty())?;
        Some(Notice { level, message })
    }
}

#[derive(Debug)]
pub enum PageResponse {
    Redirect { location: String },
    Html { status: StatusCode, body: String },
}

impl PageResponse {
    pub fn html(body: String) -> Self {
        PageResponse::Html { status: StatusCode::OK, body }
    }

    pub fn html_with_status(status: StatusCode, body: String) -> Self {
        PageResponse::Html { status, body }
    }

    pub fn redirect(location: impl Into<String>) -> Self {
        PageResponse::Redirect { location: location.into() }
    }

    pub fn redirect_with(location: &str, notice: Notice) -> Self {
        PageResponse::Redirect {
            location: format!(
                "{}?notice={}&message={}",
                location,
                notice.level.as_str(),
                urlencoding::encode(&notice.message)
            ),
        }
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            PageResponse::Redirect { location } => Some(location),
            PageResponse::Html { .. } => None,
        }
    }
}

impl Responder for PageResponse {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        match self {
            PageResponse::Redirect { location } => HttpResponse::SeeOther()
                .insert_header((header::LOCATION, location))
                .finish(),
            PageResponse::Html { status, body } => HttpResponse::build(status)
                .content_type("text/html; charset=utf-8")
                .body(body),
        }
    }
}

/// Renders a failure that has no form to go back to.
///
/// Unknown and malformed ids both render the 404 page.
pub fn page_error(err: AppError) -> PageResponse {
    match err {
        AppError::NotFound(msg) | AppError::InvalidInput(msg) => {
            PageResponse::html_with_status(StatusCode::NOT_FOUND, layout::not_found_page(&msg))
        }
        AppError::InternalError(msg) => {
            tracing::error!("Internal error while rendering page: {}", msg);
            PageResponse::html_with_status(
                StatusCode::INTERNAL_SERVER_ERROR,
                layout::error_page("Something went wrong on our side."),
            )
        }
        other => PageResponse::html_with_status(
            StatusCode::BAD_REQUEST,
            layout::error_page(&other.message()),
        ),
    }
}

/// True for failures caused by the submitted form values.
pub fn is_form_error(err: &AppError) -> bool {
    matches!(err, AppError::ValidationError(_) | AppError::InvalidInput(_))
}
