use std::path::PathBuf;

use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use serde::{Deserialize, Serialize};
use url::Url;
use validator::Validate;

use crate::{
    entities::{quote::{validate_not_blank, REQUIRED_FIELDS_MESSAGE}, review::Review},
    errors::AppError,
};

const MAX_TITLE_LENGTH: u64 = 255;
const MAX_AUTHOR_LENGTH: u64 = 255;

/// Directory below the media root that holds uploaded covers.
pub const COVER_UPLOAD_DIR: &str = "book_covers";

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Path relative to the media root, e.g. `book_covers/<uuid>.jpg`.
    pub cover_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookInsert {
    pub title: String,
    pub author: String,
    pub cover_image: Option<String>,
}

/// `cover_image: None` keeps the stored image.
#[derive(Debug, Clone, PartialEq)]
pub struct BookChanges {
    pub title: String,
    pub author: String,
    pub cover_image: Option<String>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub cover_image: Option<String>,
    pub cover_image_url: Option<String>,
    pub reviews: Vec<Review>,
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookRequest {
    #[validate(
        length(max = MAX_TITLE_LENGTH, message = "Title must be at most 255 characters."),
        custom(function = "validate_not_blank")
    )]
    pub title: String,

    #[validate(
        length(max = MAX_AUTHOR_LENGTH, message = "Author must be at most 255 characters."),
        custom(function = "validate_not_blank")
    )]
    pub author: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
}

/// Multipart body shared by the API and the book pages.
#[derive(Debug, MultipartForm)]
pub struct BookUpload {
    pub title: Option<Text<String>>,
    pub author: Option<Text<String>>,
    pub cover_image: Option<TempFile>,
}

/// An uploaded cover waiting to be persisted by a `CoverStore`.
/// The temporary file behind `path` must outlive the store call.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverUpload {
    pub file_name: Option<String>,
    pub path: PathBuf,
    pub size: usize,
}

// ───── Conversions ──────────────────────────────────────────────────

impl BookRequest {
    pub fn normalized(self) -> BookRequest {
        BookRequest {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
        }
    }
}

impl BookPatch {
    pub fn merge_into(self, current: &Book) -> BookRequest {
        BookRequest {
            title: self.title.unwrap_or_else(|| current.title.clone()),
            author: self.author.unwrap_or_else(|| current.author.clone()),
        }
    }

    /// Create/edit forms require both text fields.
    pub fn require_all(self) -> Result<BookRequest, AppError> {
        let filled = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        match (filled(self.title), filled(self.author)) {
            (Some(title), Some(author)) => Ok(BookRequest { title, author }),
            _ => Err(AppError::InvalidInput(REQUIRED_FIELDS_MESSAGE.to_string())),
        }
    }
}

impl BookUpload {
    /// Splits the form into its text fields and the optional file part.
    pub fn into_parts(self) -> (BookPatch, Option<TempFile>) {
        let patch = BookPatch {
            title: self.title.map(|t| t.into_inner()),
            author: self.author.map(|a| a.into_inner()),
        };
        (patch, self.cover_image)
    }
}

impl CoverUpload {
    /// Browsers send an empty file part when no file was chosen; that is not an upload.
    pub fn from_temp_file(file: &TempFile) -> Option<CoverUpload> {
        if file.size == 0 {
            return None;
        }
        Some(CoverUpload {
            file_name: file.file_name.clone(),
            path: file.file.path().to_path_buf(),
            size: file.size,
        })
    }
}

impl Book {
    pub fn into_response(self, reviews: Vec<Review>, media_url: &str, base_url: Option<&Url>) -> BookResponse {
        let cover_image_url = cover_image_url(self.cover_image.as_deref(), media_url, base_url);
        BookResponse {
            id: self.id,
            title: self.title,
            author: self.author,
            cover_image: self.cover_image,
            cover_image_url,
            reviews,
        }
    }
}

/// Builds the public URL of a stored cover.
///
/// Returns `None` without an image, an absolute URL when `base_url` is known,
/// and the relative `<media_url><stored_path>` otherwise.
pub fn cover_image_url(stored_path: Option<&str>, media_url: &str, base_url: Option<&Url>) -> Option<String> {
    let stored_path = stored_path.filter(|p| !p.is_empty())?;
    let relative = format!("{}{}", media_url, stored_path.trim_start_matches('/'));

    match base_url.and_then(|base| base.join(&relative).ok()) {
        Some(absolute) => Some(absolute.to_string()),
        None => Some(relative),
    }
}
