use async_trait::async_trait;
use sqlx::{self, PgPool};

use crate::{
    entities::{quote::{Quote, QuoteChanges, QuoteInsert}, report::EraCount},
    errors::AppError,
    repositories::sqlx_repo::SqlxQuoteRepo,
};

const QUOTE_COLUMNS: &str = "id, text, author, era, author_bio_summary, date_created";

#[async_trait]
pub trait QuoteRepository: Send + Sync {
    async fn create_quote(&self, quote: &QuoteInsert) -> Result<Quote, AppError>;
    async fn get_quote_by_id(&self, id: i64) -> Result<Quote, AppError>;
    /// All quotes, newest first.
    async fn list_quotes(&self) -> Result<Vec<Quote>, AppError>;
    async fn list_recent_quotes(&self, limit: i64) -> Result<Vec<Quote>, AppError>;
    async fn update_quote(&self, id: i64, changes: &QuoteChanges) -> Result<Quote, AppError>;
    async fn update_author_bio(&self, id: i64, summary: &str) -> Result<Quote, AppError>;
    async fn delete_quote(&self, id: i64) -> Result<(), AppError>;
    /// Quote counts grouped by era, largest group first.
    async fn count_quotes_by_era(&self) -> Result<Vec<EraCount>, AppError>;
}

impl SqlxQuoteRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxQuoteRepo { pool }
    }
}

fn quote_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Quote {} not found", id))
}

#[async_trait]
impl QuoteRepository for SqlxQuoteRepo {
    async fn create_quote(&self, quote: &QuoteInsert) -> Result<Quote, AppError> {
        let created = sqlx::query_as::<_, Quote>(&format!(
            r#"
            INSERT INTO quotes (text, author, era, author_bio_summary, date_created)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {QUOTE_COLUMNS}
            "#
        ))
        .bind(&quote.text)
        .bind(&quote.author)
        .bind(&quote.era)
        .bind(&quote.author_bio_summary)
        .bind(quote.date_created)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_quote_by_id(&self, id: i64) -> Result<Quote, AppError> {
        sqlx::query_as::<_, Quote>(&format!("SELECT {QUOTE_COLUMNS} FROM quotes WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| quote_not_found(id))
    }

    async fn list_quotes(&self) -> Result<Vec<Quote>, AppError> {
        let quotes = sqlx::query_as::<_, Quote>(&format!(
            "SELECT {QUOTE_COLUMNS} FROM quotes ORDER BY date_created DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(quotes)
    }

    async fn list_recent_quotes(&self, limit: i64) -> Result<Vec<Quote>, AppError> {
        let quotes = sqlx::query_as::<_, Quote>(&format!(
            "SELECT {QUOTE_COLUMNS} FROM quotes ORDER BY date_created DESC, id DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(quotes)
    }

    async fn update_quote(&self, id: i64, changes: &QuoteChanges) -> Result<Quote, AppError> {
        sqlx::query_as::<_, Quote>(&format!(
            r#"
            UPDATE quotes SET
                text = $1,
                author = $2,
                era = $3,
                author_bio_summary = $4
            WHERE id = $5
            RETURNING {QUOTE_COLUMNS}
            "#
        ))
        .bind(&changes.text)
        .bind(&changes.author)
        .bind(&changes.era)
        .bind(&changes.author_bio_summary)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| quote_not_found(id))
    }

    async fn update_author_bio(&self, id: i64, summary: &str) -> Result<Quote, AppError> {
        sqlx::query_as::<_, Quote>(&format!(
            "UPDATE quotes SET author_bio_summary = $1 WHERE id = $2 RETURNING {QUOTE_COLUMNS}"
        ))
        .bind(summary)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| quote_not_found(id))
    }

    async fn delete_quote(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM quotes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(quote_not_found(id));
        }

        Ok(())
    }

    async fn count_quotes_by_era(&self) -> Result<Vec<EraCount>, AppError> {
        let report = sqlx::query_as::<_, EraCount>(
            r#"
            SELECT era, COUNT(id) AS quote_count
            FROM quotes
            GROUP BY era
            ORDER BY quote_count DESC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(report)
    }
}
