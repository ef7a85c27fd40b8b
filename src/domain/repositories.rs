use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::book_items::{Book, BookChanges, BookWithCreator, NewBook};
use crate::domain::ids::{BookId, ReviewId, UserId};
use crate::domain::listing::{Page, PageRequest};
use crate::domain::reviews::{NewReview, Review, ReviewUpdate, ReviewWithReviewer};
use crate::domain::tokens::Token;
use crate::domain::users::{NewUser, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores the user and the hash of their first API token in one write.
    /// Fails with `Conflict` when the email is already registered.
    async fn insert_with_token(
        &self,
        user: NewUser,
        token_hash: String,
    ) -> Result<User, RepositoryError>;
    async fn get(&self, id: UserId) -> Result<User, RepositoryError>;
}

#[async_trait]
pub trait TokenRepository: Send + Sync {
    async fn get_by_token_hash(&self, token_hash: &str) -> Result<Token, RepositoryError>;
}

#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn insert(&self, book: NewBook) -> Result<Book, RepositoryError>;
    async fn get(&self, id: BookId) -> Result<Book, RepositoryError>;
    async fn get_with_creator(&self, id: BookId) -> Result<BookWithCreator, RepositoryError>;
    /// One page of books in insertion order, each joined with its creator.
    async fn list(&self, request: PageRequest) -> Result<Page<BookWithCreator>, RepositoryError>;
    async fn update(&self, id: BookId, changes: BookChanges) -> Result<Book, RepositoryError>;
    /// Removes the book together with every review that references it, as one
    /// unit. Returns the number of reviews removed.
    async fn delete_with_reviews(&self, id: BookId) -> Result<u64, RepositoryError>;
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Fails with `Conflict` when the user already reviewed the book.
    async fn insert(&self, review: NewReview) -> Result<Review, RepositoryError>;
    async fn get(&self, id: ReviewId) -> Result<Review, RepositoryError>;
    async fn list_for_book(&self, book_id: BookId) -> Result<Vec<Review>, RepositoryError>;
    async fn list_for_book_with_reviewers(
        &self,
        book_id: BookId,
    ) -> Result<Vec<ReviewWithReviewer>, RepositoryError>;
    async fn update(&self, id: ReviewId, changes: ReviewUpdate)
    -> Result<Review, RepositoryError>;
    async fn delete(&self, id: ReviewId) -> Result<(), RepositoryError>;
}
