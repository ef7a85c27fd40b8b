use std::sync::Arc;

use futures::future::try_join_all;

use super::RatingAggregator;
use crate::application::errors::AppError;
use crate::domain::book_items::{BookPage, BookWithRating};
use crate::domain::listing::{PageNumber, PageRequest};
use crate::domain::repositories::BookRepository;

/// Serves the public catalogue, one fixed-size page at a time.
#[derive(Clone)]
pub struct BookListingService {
    books: Arc<dyn BookRepository>,
    ratings: RatingAggregator,
}

impl BookListingService {
    pub fn new(books: Arc<dyn BookRepository>, ratings: RatingAggregator) -> Self {
        Self { books, ratings }
    }

    /// Pages past the end yield an empty `books` list with the real page count.
    pub async fn list(&self, page: PageNumber) -> Result<BookPage, AppError> {
        let page = self.books.list(PageRequest::books(page)).await?;
        let pages = page.total_pages();

        let summaries = try_join_all(
            page.items
                .iter()
                .map(|book| self.ratings.aggregate(book.id)),
        )
        .await?;

        let books = page
            .items
            .into_iter()
            .zip(summaries)
            .map(|(book, rating)| BookWithRating { book, rating })
            .collect();

        Ok(BookPage {
            books,
            page: page.page,
            pages,
        })
    }
}
