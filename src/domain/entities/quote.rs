use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{entities::option_fields::OptionField, errors::AppError};

// ───── Constants ──────────────────────────────────────────────────────
const MAX_AUTHOR_LENGTH: u64 = 100;
const MAX_ERA_LENGTH: u64 = 50;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields.";

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Quote {
    pub id: i64,
    pub text: String,
    pub author: String,
    pub era: Option<String>,
    pub author_bio_summary: Option<String>,
    pub date_created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteInsert {
    pub text: String,
    pub author: String,
    pub era: Option<String>,
    pub author_bio_summary: Option<String>,
    pub date_created: DateTime<Utc>,
}

/// Full replacement of the mutable quote columns. `date_created` is never touched.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteChanges {
    pub text: String,
    pub author: String,
    pub era: Option<String>,
    pub author_bio_summary: Option<String>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BioFetchResponse {
    pub message: String,
    pub summary: String,
}

// ───── Input & Validation Requests ──────────────────────────────────

/// Body of `POST /api/quotes` and `PUT /api/quotes/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuoteRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub text: String,

    #[validate(
        length(max = MAX_AUTHOR_LENGTH, message = "Author must be at most 100 characters."),
        custom(function = "validate_not_blank")
    )]
    pub author: String,

    #[serde(default)]
    #[validate(length(max = MAX_ERA_LENGTH, message = "Era must be at most 50 characters."))]
    pub era: Option<String>,

    #[serde(default)]
    pub author_bio_summary: Option<String>,
}

/// Body of `PUT /api/quotes/{id}`. Text and author are required; an absent
/// `era` or `author_bio_summary` keeps the stored value and `null` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteReplace {
    pub text: String,
    pub author: String,

    #[serde(default)]
    pub era: OptionField<String>,

    #[serde(default)]
    pub author_bio_summary: OptionField<String>,
}

/// Body of `PATCH /api/quotes/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuotePatch {
    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub era: OptionField<String>,

    #[serde(default)]
    pub author_bio_summary: OptionField<String>,
}

/// Form submitted by the quote create/edit pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteForm {
    pub text: Option<String>,
    pub author: Option<String>,
    pub era: Option<String>,
}

// ───── Validation Helpers ───────────────────────────────────────────

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::Borrowed("This field may not be blank."));
        return Err(err);
    }
    Ok(())
}

/// Trims the value and treats an empty string as absent.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn filled(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ───── Conversions ──────────────────────────────────────────────────

impl QuoteRequest {
    /// Trims text fields and turns blank optional fields into `None`.
    pub fn normalized(self) -> QuoteRequest {
        QuoteRequest {
            text: self.text.trim().to_string(),
            author: self.author.trim().to_string(),
            era: normalize_optional(self.era),
            author_bio_summary: normalize_optional(self.author_bio_summary),
        }
    }

    pub fn into_changes(self) -> QuoteChanges {
        QuoteChanges {
            text: self.text.trim().to_string(),
            author: self.author.trim().to_string(),
            era: normalize_optional(self.era),
            author_bio_summary: normalize_optional(self.author_bio_summary),
        }
    }

    pub fn prepare_for_insert(self) -> QuoteInsert {
        let changes = self.into_changes();
        QuoteInsert {
            text: changes.text,
            author: changes.author,
            era: changes.era,
            author_bio_summary: changes.author_bio_summary,
            date_created: Utc::now(),
        }
    }
}

impl QuoteReplace {
    pub fn into_patch(self) -> QuotePatch {
        QuotePatch {
            text: Some(self.text),
            author: Some(self.author),
            era: self.era,
            author_bio_summary: self.author_bio_summary,
        }
    }
}

impl QuotePatch {
    /// Resolves the patch against the stored quote into a full request.
    pub fn merge_into(self, current: &Quote) -> QuoteRequest {
        QuoteRequest {
            text: self.text.unwrap_or_else(|| current.text.clone()),
            author: self.author.unwrap_or_else(|| current.author.clone()),
            era: self.era.apply(current.era.clone()),
            author_bio_summary: self.author_bio_summary.apply(current.author_bio_summary.clone()),
        }
    }
}

impl QuoteForm {
    pub fn into_request(self) -> Result<QuoteRequest, AppError> {
        match (filled(self.text), filled(self.author)) {
            (Some(text), Some(author)) => Ok(QuoteRequest {
                text,
                author,
                era: self.era,
                author_bio_summary: None,
            }),
            _ => Err(AppError::InvalidInput(REQUIRED_FIELDS_MESSAGE.to_string())),
        }
    }

    /// Edit pages never touch the stored biography.
    pub fn into_patch(self) -> Result<QuotePatch, AppError> {
        let request = self.into_request()?;
        Ok(QuotePatch {
            text: Some(request.text),
            author: Some(request.author),
            era: OptionField::from(Some(normalize_optional(request.era))),
            author_bio_summary: OptionField::Unchanged,
        })
    }
}

impl From<&Quote> for QuoteForm {
    fn from(quote: &Quote) -> Self {
        QuoteForm {
            text: Some(quote.text.clone()),
            author: Some(quote.author.clone()),
            era: quote.era.clone(),
        }
    }
}
