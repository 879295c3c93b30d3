use validator::Validate;

use crate::{
    entities::review::{Review, ReviewPatch, ReviewRequest},
    errors::AppError,
    repositories::review::ReviewRepository,
    utils::valid_id::valid_id,
};

pub struct ReviewHandler<R>
where
    R: ReviewRepository,
{
    pub review_repo: R,
}

impl<R> ReviewHandler<R>
where
    R: ReviewRepository,
{
    pub fn new(review_repo: R) -> Self {
        ReviewHandler { review_repo }
    }

    /// Creates a review for an existing book
    pub async fn create_review(&self, request: ReviewRequest) -> Result<Review, AppError> {
        let request = request.normalized();
        request.validate()?;
        self.ensure_book_exists(request.book).await?;

        self.review_repo.create_review(&request.prepare_for_insert()).await
    }

    pub async fn get_review(&self, review_id: &str) -> Result<Review, AppError> {
        let id = valid_id(review_id)?;
        self.review_repo.get_review_by_id(id).await
    }

    /// Reviews newest first, optionally only those of one book
    pub async fn list_reviews(&self, book_id: Option<i64>) -> Result<Vec<Review>, AppError> {
        self.review_repo.list_reviews(book_id).await
    }

    pub async fn update_review(&self, review_id: &str, request: ReviewRequest) -> Result<Review, AppError> {
        let id = valid_id(review_id)?;
        let request = request.normalized();
        request.validate()?;
        self.ensure_book_exists(request.book).await?;

        self.review_repo.update_review(id, &request.into_changes()).await
    }

    pub async fn patch_review(&self, review_id: &str, patch: ReviewPatch) -> Result<Review, AppError> {
        let id = valid_id(review_id)?;
        let current = self.review_repo.get_review_by_id(id).await?;

        let request = patch.merge_into(&current).normalized();
        request.validate()?;
        if request.book != current.book_id {
            self.ensure_book_exists(request.book).await?;
        }

        self.review_repo.update_review(id, &request.into_changes()).await
    }

    pub async fn delete_review(&self, review_id: &str) -> Result<(), AppError> {
        let id = valid_id(review_id)?;
        self.review_repo.delete_review(id).await
    }

    async fn ensure_book_exists(&self, book_id: i64) -> Result<(), AppError> {
        if self.review_repo.book_exists(book_id).await? {
            Ok(())
        } else {
            Err(AppError::invalid_field(
                "book",
                format!("Invalid pk \"{}\" - object does not exist.", book_id),
            ))
        }
    }
}
