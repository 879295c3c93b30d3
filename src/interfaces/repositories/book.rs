use async_trait::async_trait;
use sqlx::{self, PgPool};

use crate::{
    entities::{book::{Book, BookChanges, BookInsert}, review::Review},
    errors::AppError,
    repositories::sqlx_repo::SqlxBookRepo,
};

#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn create_book(&self, book: &BookInsert) -> Result<Book, AppError>;
    async fn get_book_by_id(&self, id: i64) -> Result<Book, AppError>;
    /// All books ordered by title.
    async fn list_books(&self) -> Result<Vec<Book>, AppError>;
    async fn update_book(&self, id: i64, changes: &BookChanges) -> Result<Book, AppError>;
    /// Deletes the book together with its reviews in one transaction.
    async fn delete_book(&self, id: i64) -> Result<(), AppError>;
    /// Reviews of the given books, newest first.
    async fn list_reviews_for_books(&self, book_ids: &[i64]) -> Result<Vec<Review>, AppError>;
}

impl SqlxBookRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxBookRepo { pool }
    }
}

fn book_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}

#[async_trait]
impl BookRepository for SqlxBookRepo {
    async fn create_book(&self, book: &BookInsert) -> Result<Book, AppError> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, cover_image)
            VALUES ($1, $2, $3)
            RETURNING id, title, author, cover_image
            "#
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.cover_image)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_book_by_id(&self, id: i64) -> Result<Book, AppError> {
        sqlx::query_as::<_, Book>("SELECT id, title, author, cover_image FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| book_not_found(id))
    }

    async fn list_books(&self) -> Result<Vec<Book>, AppError> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, cover_image FROM books ORDER BY title ASC, id ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    async fn update_book(&self, id: i64, changes: &BookChanges) -> Result<Book, AppError> {
        // COALESCE keeps the stored cover when no new upload came in
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET
                title = $1,
                author = $2,
                cover_image = COALESCE($3, cover_image)
            WHERE id = $4
            RETURNING id, title, author, cover_image
            "#
        )
        .bind(&changes.title)
        .bind(&changes.author)
        .bind(&changes.cover_image)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| book_not_found(id))
    }

    async fn delete_book(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let reviews = sqlx::query("DELETE FROM reviews WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(book_not_found(id));
        }

        tx.commit().await?;
        tracing::debug!(book_id = id, reviews_deleted = reviews.rows_affected(), "Deleted book");

        Ok(())
    }

    async fn list_reviews_for_books(&self, book_ids: &[i64]) -> Result<Vec<Review>, AppError> {
        if book_ids.is_empty() {
            return Ok(Vec::new());
        }

        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, book_id, reviewer_name, rating, body, created_at
            FROM reviews
            WHERE book_id = ANY($1)
            ORDER BY created_at DESC, id DESC
            "#
        )
        .bind(book_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }
}
