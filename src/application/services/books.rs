use std::sync::Arc;

use crate::application::errors::AppError;
use crate::domain::book_items::{Book, BookChanges, BookDraft};
use crate::domain::ids::{BookId, UserId};
use crate::domain::ownership::authorize;
use crate::domain::repositories::BookRepository;

/// Owner-gated book mutations.
#[derive(Clone)]
pub struct BookService {
    books: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(books: Arc<dyn BookRepository>) -> Self {
        Self { books }
    }

    pub async fn create(&self, draft: BookDraft, user_id: UserId) -> Result<Book, AppError> {
        let new_book = draft.validate(user_id)?;
        Ok(self.books.insert(new_book).await?)
    }

    pub async fn update(
        &self,
        id: BookId,
        changes: BookChanges,
        user_id: UserId,
    ) -> Result<Book, AppError> {
        let existing = self.books.get(id).await?;
        if !authorize(existing.added_by, user_id).is_authorized() {
            return Err(AppError::Unauthorized);
        }

        Ok(self.books.update(id, changes.normalize()).await?)
    }

    /// Removes the book and every review of it. Returns the number of
    /// reviews removed.
    pub async fn delete(&self, id: BookId, user_id: UserId) -> Result<u64, AppError> {
        let existing = self.books.get(id).await?;
        if !authorize(existing.added_by, user_id).is_authorized() {
            return Err(AppError::Unauthorized);
        }

        Ok(self.books.delete_with_reviews(id).await?)
    }
}
