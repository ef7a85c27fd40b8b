use std::sync::Arc;

use crate::application::errors::AppError;
use crate::domain::book_items::BookDetail;
use crate::domain::ids::BookId;
use crate::domain::ratings::RatingSummary;
use crate::domain::repositories::{BookRepository, ReviewRepository};

#[derive(Clone)]
pub struct BookDetailService {
    books: Arc<dyn BookRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl BookDetailService {
    pub fn new(books: Arc<dyn BookRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { books, reviews }
    }

    /// The average is computed from the same review list that is returned, so
    /// the two always agree.
    pub async fn get_detail(&self, book_id: BookId) -> Result<BookDetail, AppError> {
        let book = self.books.get_with_creator(book_id).await?;
        let reviews = self.reviews.list_for_book_with_reviewers(book_id).await?;
        let summary =
            RatingSummary::from_ratings(reviews.iter().map(|entry| entry.review.rating));

        Ok(BookDetail {
            book,
            reviews,
            average_rating: summary.average_rating,
        })
    }
}
