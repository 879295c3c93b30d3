use async_trait::async_trait;
use sqlx::{self, PgPool, Postgres, QueryBuilder};

use crate::{
    entities::review::{Review, ReviewChanges, ReviewInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxReviewRepo,
};

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create_review(&self, review: &ReviewInsert) -> Result<Review, AppError>;
    async fn get_review_by_id(&self, id: i64) -> Result<Review, AppError>;
    /// Reviews newest first, optionally restricted to one book.
    async fn list_reviews(&self, book_id: Option<i64>) -> Result<Vec<Review>, AppError>;
    async fn update_review(&self, id: i64, changes: &ReviewChanges) -> Result<Review, AppError>;
    async fn delete_review(&self, id: i64) -> Result<(), AppError>;
    async fn book_exists(&self, book_id: i64) -> Result<bool, AppError>;
}

impl SqlxReviewRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxReviewRepo { pool }
    }
}

fn review_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Review {} not found", id))
}

#[async_trait]
impl ReviewRepository for SqlxReviewRepo {
    async fn create_review(&self, review: &ReviewInsert) -> Result<Review, AppError> {
        let created = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (book_id, reviewer_name, rating, body, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, book_id, reviewer_name, rating, body, created_at
            "#
        )
        .bind(review.book_id)
        .bind(&review.reviewer_name)
        .bind(review.rating)
        .bind(&review.body)
        .bind(review.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_review_by_id(&self, id: i64) -> Result<Review, AppError> {
        sqlx::query_as::<_, Review>(
            "SELECT id, book_id, reviewer_name, rating, body, created_at FROM reviews WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| review_not_found(id))
    }

    async fn list_reviews(&self, book_id: Option<i64>) -> Result<Vec<Review>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT id, book_id, reviewer_name, rating, body, created_at FROM reviews"
        );

        if let Some(book_id) = book_id {
            builder.push(" WHERE book_id = ").push_bind(book_id);
        }

        builder.push(" ORDER BY created_at DESC, id DESC");

        let reviews = builder
            .build_query_as::<Review>()
            .fetch_all(&self.pool)
            .await?;

        Ok(reviews)
    }

    async fn update_review(&self, id: i64, changes: &ReviewChanges) -> Result<Review, AppError> {
        sqlx::query_as::<_, Review>(
            r#"
            UPDATE reviews SET
                book_id = $1,
                reviewer_name = $2,
                rating = $3,
                body = $4
            WHERE id = $5
            RETURNING id, book_id, reviewer_name, rating, body, created_at
            "#
        )
        .bind(changes.book_id)
        .bind(&changes.reviewer_name)
        .bind(changes.rating)
        .bind(&changes.body)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| review_not_found(id))
    }

    async fn delete_review(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(review_not_found(id));
        }

        Ok(())
    }

    async fn book_exists(&self, book_id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM books WHERE id = $1)")
            .bind(book_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }
}
