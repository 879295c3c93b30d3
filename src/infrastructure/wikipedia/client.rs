use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{instrument, warn};

use crate::{errors::AppError, settings::AppConfig};

/// Extract text that counts as "no summary", same as an empty extract.
pub const NO_SUMMARY_PLACEHOLDER: &str = "No summary found.";

#[async_trait]
pub trait BioProvider: Send + Sync {
    /// Looks up the introductory summary of the author's article.
    /// Makes exactly one request; callers decide whether to offer a retry.
    async fn fetch_summary(&self, author: &str) -> Result<String, AppError>;
}

#[derive(Clone)]
pub struct WikipediaClient {
    client: Client,
    api_url: String,
}

impl WikipediaClient {
    pub fn new(api_url: impl Into<String>, user_agent: &str, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(WikipediaClient {
            client,
            api_url: api_url.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Self::new(config.bio_api_url.clone(), &config.bio_user_agent, config.bio_timeout())
    }
}

#[async_trait]
impl BioProvider for WikipediaClient {
    #[instrument(skip(self))]
    async fn fetch_summary(&self, author: &str) -> Result<String, AppError> {
        let params = [
            ("action", "query"),
            ("format", "json"),
            ("titles", author),
            ("prop", "extracts"),
            ("exintro", "1"),
            ("explaintext", "1"),
            ("redirects", "1"),
        ];

        let response = self.client
            .get(&self.api_url)
            .query(&params)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(external_error)?;

        let data: Value = response.json().await.map_err(external_error)?;

        extract_summary(author, &data)
    }
}

fn external_error(err: reqwest::Error) -> AppError {
    warn!("Wikipedia request failed: {}", err);
    AppError::ExternalService(format!("External API error while fetching bio: {}", err))
}

/// Pulls the plain-text extract of the first returned page out of a
/// `action=query&prop=extracts` response.
pub fn extract_summary(author: &str, data: &Value) -> Result<String, AppError> {
    let no_article = || AppError::NotFound(format!("No Wikipedia article found for {}.", author));

    let page = data
        .get("query")
        .and_then(|q| q.get("pages"))
        .and_then(Value::as_object)
        .and_then(|pages| pages.values().next())
        .ok_or_else(no_article)?;

    // Missing titles come back under the pseudo page id -1
    let page_id = page.get("pageid").and_then(Value::as_i64).unwrap_or(-1);
    if page.get("missing").is_some() || page_id == -1 {
        return Err(no_article());
    }

    match page.get("extract").and_then(Value::as_str) {
        Some(extract) if !extract.is_empty() && extract != NO_SUMMARY_PLACEHOLDER => Ok(extract.to_string()),
        _ => Err(AppError::NotFound(format!(
            "Wikipedia article found but no summary available for {}.",
            author
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn returns_extract_of_existing_page() {
        let data = json!({"query": {"pages": {"123": {"pageid": 123, "title": "Keats", "extract": "John Keats was a poet."}}}});
        assert_eq!(extract_summary("Keats", &data).unwrap(), "John Keats was a poet.");
    }

    #[test]
    fn missing_page_is_not_found() {
        let data = json!({"query": {"pages": {"-1": {"ns": 0, "title": "Nobody", "missing": ""}}}});
        let err = extract_summary("Nobody", &data).unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "No Wikipedia article found for Nobody."));
    }

    #[test]
    fn malformed_shape_is_not_found() {
        for data in [json!({}), json!({"query": {}}), json!({"query": {"pages": {}}}), json!({"batchcomplete": ""})] {
            assert!(matches!(extract_summary("X", &data), Err(AppError::NotFound(_))));
        }
    }

    #[test]
    fn placeholder_or_empty_extract_has_no_summary() {
        for page in [
            json!({"pageid": 5}),
            json!({"pageid": 5, "extract": ""}),
            json!({"pageid": 5, "extract": NO_SUMMARY_PLACEHOLDER}),
        ] {
            let data = json!({"query": {"pages": {"5": page}}});
            let err = extract_summary("Blake", &data).unwrap_err();
            assert_eq!(err.message(), "Wikipedia article found but no summary available for Blake.");
        }
    }
}
