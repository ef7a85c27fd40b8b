use std::sync::Arc;

use crate::application::errors::AppError;
use crate::domain::RepositoryError;
use crate::domain::ids::{ReviewId, UserId};
use crate::domain::ownership::authorize;
use crate::domain::repositories::{BookRepository, ReviewRepository};
use crate::domain::reviews::{Review, ReviewChanges, ReviewDraft};

/// Owner-gated review mutations.
#[derive(Clone)]
pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
    books: Arc<dyn BookRepository>,
}

impl ReviewService {
    pub fn new(reviews: Arc<dyn ReviewRepository>, books: Arc<dyn BookRepository>) -> Self {
        Self { reviews, books }
    }

    /// One review per user per book. The store's uniqueness check decides
    /// concurrent duplicates; the loser gets `DuplicateReview`.
    pub async fn create(&self, draft: ReviewDraft, user_id: UserId) -> Result<Review, AppError> {
        let new_review = draft.validate(user_id)?;
        self.books.get(new_review.book_id).await?;

        self.reviews
            .insert(new_review)
            .await
            .map_err(|err| match err {
                RepositoryError::Conflict(_) => AppError::DuplicateReview,
                other => AppError::from(other),
            })
    }

    pub async fn update(
        &self,
        id: ReviewId,
        changes: ReviewChanges,
        user_id: UserId,
    ) -> Result<Review, AppError> {
        let existing = self.reviews.get(id).await?;
        if !authorize(existing.user_id, user_id).is_authorized() {
            return Err(AppError::Unauthorized);
        }

        let update = changes.validate()?;
        Ok(self.reviews.update(id, update).await?)
    }

    pub async fn delete(&self, id: ReviewId, user_id: UserId) -> Result<(), AppError> {
        let existing = self.reviews.get(id).await?;
        if !authorize(existing.user_id, user_id).is_authorized() {
            return Err(AppError::Unauthorized);
        }

        Ok(self.reviews.delete(id).await?)
    }
}
