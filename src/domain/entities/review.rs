use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    entities::quote::{validate_not_blank, REQUIRED_FIELDS_MESSAGE},
    errors::AppError,
};

const MAX_REVIEWER_NAME_LENGTH: u64 = 100;
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

pub const RATING_RANGE_MESSAGE: &str = "Rating must be between 1 and 5.";
pub const RATING_INVALID_MESSAGE: &str = "Invalid rating value.";

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub id: i64,
    #[serde(rename = "book")]
    pub book_id: i64,
    pub reviewer_name: String,
    pub rating: i32,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewInsert {
    pub book_id: i64,
    pub reviewer_name: String,
    pub rating: i32,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewChanges {
    pub book_id: i64,
    pub reviewer_name: String,
    pub rating: i32,
    pub body: String,
}

// ───── Input & Validation Requests ──────────────────────────────────

/// Body of `POST /api/reviews` and `PUT /api/reviews/{id}`; the book is referenced by id.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviewRequest {
    pub book: i64,

    #[validate(
        length(max = MAX_REVIEWER_NAME_LENGTH, message = "Reviewer name must be at most 100 characters."),
        custom(function = "validate_not_blank")
    )]
    pub reviewer_name: String,

    #[validate(range(min = MIN_RATING, max = MAX_RATING, message = "Rating must be between 1 and 5."))]
    pub rating: i32,

    #[validate(custom(function = "validate_not_blank"))]
    pub body: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewPatch {
    pub book: Option<i64>,
    pub reviewer_name: Option<String>,
    pub rating: Option<i32>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewForm {
    pub reviewer_name: Option<String>,
    pub rating: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewFilter {
    pub book_id: Option<i64>,
}

// ───── Helpers ──────────────────────────────────────────────────────

/// Parses a rating submitted as text, rejecting non-numeric and out-of-range values.
pub fn parse_rating(raw: &str) -> Result<i32, AppError> {
    let rating: i32 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::invalid_field("rating", RATING_INVALID_MESSAGE))?;

    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(AppError::invalid_field("rating", RATING_RANGE_MESSAGE));
    }
    Ok(rating)
}

// ───── Conversions ──────────────────────────────────────────────────

impl ReviewRequest {
    pub fn normalized(self) -> ReviewRequest {
        ReviewRequest {
            book: self.book,
            reviewer_name: self.reviewer_name.trim().to_string(),
            rating: self.rating,
            body: self.body.trim().to_string(),
        }
    }

    pub fn into_changes(self) -> ReviewChanges {
        ReviewChanges {
            book_id: self.book,
            reviewer_name: self.reviewer_name.trim().to_string(),
            rating: self.rating,
            body: self.body.trim().to_string(),
        }
    }

    pub fn prepare_for_insert(self) -> ReviewInsert {
        let changes = self.into_changes();
        ReviewInsert {
            book_id: changes.book_id,
            reviewer_name: changes.reviewer_name,
            rating: changes.rating,
            body: changes.body,
            created_at: Utc::now(),
        }
    }
}

impl ReviewPatch {
    pub fn merge_into(self, current: &Review) -> ReviewRequest {
        ReviewRequest {
            book: self.book.unwrap_or(current.book_id),
            reviewer_name: self.reviewer_name.unwrap_or_else(|| current.reviewer_name.clone()),
            rating: self.rating.unwrap_or(current.rating),
            body: self.body.unwrap_or_else(|| current.body.clone()),
        }
    }
}

impl ReviewForm {
    pub fn into_request(self, book_id: i64) -> Result<ReviewRequest, AppError> {
        let filled = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        match (filled(self.reviewer_name), filled(self.rating), filled(self.body)) {
            (Some(reviewer_name), Some(rating), Some(body)) => Ok(ReviewRequest {
                book: book_id,
                reviewer_name,
                rating: parse_rating(&rating)?,
                body,
            }),
            _ => Err(AppError::InvalidInput(REQUIRED_FIELDS_MESSAGE.to_string())),
        }
    }
}

impl From<&Review> for ReviewForm {
    fn from(review: &Review) -> Self {
        ReviewForm {
            reviewer_name: Some(review.reviewer_name.clone()),
            rating: Some(review.rating.to_string()),
            body: Some(review.body.clone()),
        }
    }
}
