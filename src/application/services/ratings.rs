use std::sync::Arc;

use crate::application::errors::AppError;
use crate::domain::ids::BookId;
use crate::domain::ratings::RatingSummary;
use crate::domain::repositories::ReviewRepository;

/// Computes a book's rating summary from its stored reviews on every call.
#[derive(Clone)]
pub struct RatingAggregator {
    reviews: Arc<dyn ReviewRepository>,
}

impl RatingAggregator {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    /// The book itself need not exist; an unknown id has no reviews.
    pub async fn aggregate(&self, book_id: BookId) -> Result<RatingSummary, AppError> {
        let reviews = self.reviews.list_for_book(book_id).await?;
        Ok(RatingSummary::from_ratings(
            reviews.iter().map(|review| review.rating),
        ))
    }
}
