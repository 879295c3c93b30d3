use tracing::info;
use validator::Validate;

use crate::{
    entities::{
        quote::{BioFetchResponse, Quote, QuotePatch, QuoteReplace, QuoteRequest},
        report::EraCount,
    },
    errors::AppError,
    repositories::quote::QuoteRepository,
    utils::valid_id::valid_id,
    wikipedia::client::BioProvider,
};

pub struct QuoteHandler<R, B>
where
    R: QuoteRepository,
    B: BioProvider,
{
    pub quote_repo: R,
    pub bio_provider: B,
}

impl<R, B> QuoteHandler<R, B>
where
    R: QuoteRepository,
    B: BioProvider,
{
    pub fn new(quote_repo: R, bio_provider: B) -> Self {
        QuoteHandler { quote_repo, bio_provider }
    }

    /// Creates a new quote; `date_created` is stamped here and never changes.
    pub async fn create_quote(&self, request: QuoteRequest) -> Result<Quote, AppError> {
        let request = request.normalized();
        request.validate()?;
        self.quote_repo.create_quote(&request.prepare_for_insert()).await
    }

    pub async fn get_quote(&self, quote_id: &str) -> Result<Quote, AppError> {
        let id = valid_id(quote_id)?;
        self.quote_repo.get_quote_by_id(id).await
    }

    /// All quotes, newest first
    pub async fn list_quotes(&self) -> Result<Vec<Quote>, AppError> {
        self.quote_repo.list_quotes().await
    }

    pub async fn list_recent_quotes(&self, limit: i64) -> Result<Vec<Quote>, AppError> {
        self.quote_repo.list_recent_quotes(limit).await
    }

    /// Replaces text and author; `era` and the bio change only when given
    pub async fn update_quote(&self, quote_id: &str, replace: QuoteReplace) -> Result<Quote, AppError> {
        self.patch_quote(quote_id, replace.into_patch()).await
    }

    /// Updates only the fields present in the patch
    pub async fn patch_quote(&self, quote_id: &str, patch: QuotePatch) -> Result<Quote, AppError> {
        let id = valid_id(quote_id)?;
        let current = self.quote_repo.get_quote_by_id(id).await?;

        let request = patch.merge_into(&current).normalized();
        request.validate()?;

        self.quote_repo.update_quote(id, &request.into_changes()).await
    }

    pub async fn delete_quote(&self, quote_id: &str) -> Result<(), AppError> {
        let id = valid_id(quote_id)?;
        self.quote_repo.delete_quote(id).await
    }

    /// Fetches the author's biography and stores it on the quote.
    ///
    /// The stored summary is only touched when the lookup succeeds.
    pub async fn fetch_author_bio(&self, quote_id: &str) -> Result<BioFetchResponse, AppError> {
        let id = valid_id(quote_id)?;
        let quote = self.quote_repo.get_quote_by_id(id).await?;

        let summary = self.bio_provider.fetch_summary(&quote.author).await?;

        self.quote_repo.update_author_bio(quote.id, &summary).await?;
        info!(quote_id = quote.id, author = %quote.author, "Saved author biography");

        Ok(BioFetchResponse {
            message: format!("Successfully fetched and saved bio for {}.", quote.author),
            summary,
        })
    }

    /// Quote counts per era, largest first
    pub async fn era_report(&self) -> Result<Vec<EraCount>, AppError> {
        self.quote_repo.count_quotes_by_era().await
    }
}
