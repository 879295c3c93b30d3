use std::collections::HashMap;

use url::Url;
use validator::Validate;

use crate::{
    entities::{
        book::{Book, BookChanges, BookInsert, BookPatch, BookRequest, BookResponse, CoverUpload},
        review::Review,
    },
    errors::AppError,
    repositories::book::BookRepository,
    storage::cover_store::CoverStore,
    utils::valid_id::valid_id,
};

pub struct BookHandler<R, S>
where
    R: BookRepository,
    S: CoverStore,
{
    pub book_repo: R,
    pub cover_store: S,
    pub media_url: String,
}

impl<R, S> BookHandler<R, S>
where
    R: BookRepository,
    S: CoverStore,
{
    pub fn new(book_repo: R, cover_store: S, media_url: impl Into<String>) -> Self {
        BookHandler {
            book_repo,
            cover_store,
            media_url: media_url.into(),
        }
    }

    /// Creates a book, storing the cover first when one was uploaded
    pub async fn create_book(
        &self,
        request: BookRequest,
        cover: Option<CoverUpload>,
        base_url: Option<&Url>,
    ) -> Result<BookResponse, AppError> {
        let request = request.normalized();
        request.validate()?;

        let cover_image = self.store_cover(cover.as_ref()).await?;

        let book = self.book_repo
            .create_book(&BookInsert {
                title: request.title,
                author: request.author,
                cover_image,
            })
            .await?;

        Ok(self.to_response(book, Vec::new(), base_url))
    }

    /// Retrieves a book with its reviews, newest first
    pub async fn get_book(&self, book_id: &str, base_url: Option<&Url>) -> Result<BookResponse, AppError> {
        let id = valid_id(book_id)?;
        let book = self.book_repo.get_book_by_id(id).await?;
        let reviews = self.book_repo.list_reviews_for_books(&[id]).await?;

        Ok(self.to_response(book, reviews, base_url))
    }

    /// All books ordered by title, each with its reviews
    pub async fn list_books(&self, base_url: Option<&Url>) -> Result<Vec<BookResponse>, AppError> {
        let books = self.book_repo.list_books().await?;
        let ids: Vec<i64> = books.iter().map(|b| b.id).collect();

        let mut reviews_by_book: HashMap<i64, Vec<Review>> = HashMap::new();
        for review in self.book_repo.list_reviews_for_books(&ids).await? {
            reviews_by_book.entry(review.book_id).or_default().push(review);
        }

        Ok(books
            .into_iter()
            .map(|book| {
                let reviews = reviews_by_book.remove(&book.id).unwrap_or_default();
                self.to_response(book, reviews, base_url)
            })
            .collect())
    }

    /// Replaces title and author; a new cover replaces the old one, no cover keeps it
    pub async fn update_book(
        &self,
        book_id: &str,
        request: BookRequest,
        cover: Option<CoverUpload>,
        base_url: Option<&Url>,
    ) -> Result<BookResponse, AppError> {
        let id = valid_id(book_id)?;
        let current = self.book_repo.get_book_by_id(id).await?;
        self.apply_update(current, request, cover, base_url).await
    }

    pub async fn patch_book(
        &self,
        book_id: &str,
        patch: BookPatch,
        cover: Option<CoverUpload>,
        base_url: Option<&Url>,
    ) -> Result<BookResponse, AppError> {
        let id = valid_id(book_id)?;
        let current = self.book_repo.get_book_by_id(id).await?;
        let request = patch.merge_into(&current);
        self.apply_update(current, request, cover, base_url).await
    }

    /// Deletes a book and, with it, all of its reviews
    pub async fn delete_book(&self, book_id: &str) -> Result<(), AppError> {
        let id = valid_id(book_id)?;
        self.book_repo.delete_book(id).await
    }

    async fn apply_update(
        &self,
        current: Book,
        request: BookRequest,
        cover: Option<CoverUpload>,
        base_url: Option<&Url>,
    ) -> Result<BookResponse, AppError> {
        let request = request.normalized();
        request.validate()?;

        let cover_image = self.store_cover(cover.as_ref()).await?;

        let book = self.book_repo
            .update_book(current.id, &BookChanges {
                title: request.title,
                author: request.author,
                cover_image,
            })
            .await?;
        let reviews = self.book_repo.list_reviews_for_books(&[book.id]).await?;

        Ok(self.to_response(book, reviews, base_url))
    }

    async fn store_cover(&self, cover: Option<&CoverUpload>) -> Result<Option<String>, AppError> {
        match cover {
            Some(upload) => Ok(Some(self.cover_store.store_cover(upload).await?)),
            None => Ok(None),
        }
    }

    fn to_response(&self, book: Book, reviews: Vec<Review>, base_url: Option<&Url>) -> BookResponse {
        book.into_response(reviews, &self.media_url, base_url)
    }
}
