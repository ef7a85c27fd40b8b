//! A process-local store implementing every repository trait.
//!
//! Used by the service unit tests and by anything that wants the full
//! API semantics without a database file.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::RepositoryError;
use crate::domain::book_items::{Book, BookChanges, BookWithCreator, NewBook};
use crate::domain::ids::{BookId, ReviewId, TokenId, UserId};
use crate::domain::listing::{Page, PageRequest};
use crate::domain::repositories::{
    BookRepository, ReviewRepository, TokenRepository, UserRepository,
};
use crate::domain::reviews::{NewReview, Review, ReviewUpdate, ReviewWithReviewer};
use crate::domain::tokens::Token;
use crate::domain::users::{NewUser, User};

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: BTreeMap<UserId, User>,
    tokens: BTreeMap<TokenId, Token>,
    books: BTreeMap<BookId, Book>,
    reviews: BTreeMap<ReviewId, Review>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn book_with_creator(&self, book: &Book) -> Result<BookWithCreator, RepositoryError> {
        let creator = self.users.get(&book.added_by).ok_or_else(|| {
            RepositoryError::unexpected(format!("book {} has no creator", book.id))
        })?;
        Ok(BookWithCreator::new(book.clone(), creator.creator()))
    }
}

/// Every table lives behind one lock so multi-record writes are atomic.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert_with_token(
        &self,
        user: NewUser,
        token_hash: String,
    ) -> Result<User, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|existing| existing.email == user.email) {
            return Err(RepositoryError::conflict(
                "A user with this email already exists",
            ));
        }

        let id = UserId::new(tables.next_id());
        let stored = User {
            id,
            name: user.name,
            email: user.email,
            created_at: Utc::now(),
        };
        tables.users.insert(id, stored.clone());

        let token_id = TokenId::new(tables.next_id());
        tables.tokens.insert(
            token_id,
            Token {
                id: token_id,
                user_id: id,
                token_hash,
                created_at: stored.created_at,
            },
        );
        Ok(stored)
    }

    async fn get(&self, id: UserId) -> Result<User, RepositoryError> {
        self.tables
            .read()
            .await
            .users
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }
}

#[async_trait]
impl TokenRepository for InMemoryStore {
    async fn get_by_token_hash(&self, token_hash: &str) -> Result<Token, RepositoryError> {
        self.tables
            .read()
            .await
            .tokens
            .values()
            .find(|token| token.token_hash == token_hash)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }
}

#[async_trait]
impl BookRepository for InMemoryStore {
    async fn insert(&self, book: NewBook) -> Result<Book, RepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&book.added_by) {
            return Err(RepositoryError::NotFound);
        }

        let now = Utc::now();
        let id = BookId::new(tables.next_id());
        let stored = Book {
            id,
            title: book.title,
            author: book.author,
            description: book.description,
            genre: book.genre,
            published_year: book.published_year,
            added_by: book.added_by,
            created_at: now,
            updated_at: now,
        };
        tables.books.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get(&self, id: BookId) -> Result<Book, RepositoryError> {
        self.tables
            .read()
            .await
            .books
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn get_with_creator(&self, id: BookId) -> Result<BookWithCreator, RepositoryError> {
        let tables = self.tables.read().await;
        let book = tables.books.get(&id).ok_or(RepositoryError::NotFound)?;
        tables.book_with_creator(book)
    }

    async fn list(&self, request: PageRequest) -> Result<Page<BookWithCreator>, RepositoryError> {
        let tables = self.tables.read().await;
        let total = tables.books.len() as u64;
        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);

        let items = tables
            .books
            .values()
            .skip(skip)
            .take(usize::try_from(request.page_size()).unwrap_or(usize::MAX))
            .map(|book| tables.book_with_creator(book))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, request, total))
    }

    async fn update(&self, id: BookId, changes: BookChanges) -> Result<Book, RepositoryError> {
        let mut tables = self.tables.write().await;
        let book = tables.books.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        changes.apply(book);
        book.updated_at = Utc::now();
        Ok(book.clone())
    }

    async fn delete_with_reviews(&self, id: BookId) -> Result<u64, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.books.remove(&id).is_none() {
            return Err(RepositoryError::NotFound);
        }

        let before = tables.reviews.len();
        tables.reviews.retain(|_, review| review.book_id != id);
        Ok((before - tables.reviews.len()) as u64)
    }
}

#[async_trait]
impl ReviewRepository for InMemoryStore {
    async fn insert(&self, review: NewReview) -> Result<Review, RepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables.books.contains_key(&review.book_id)
            || !tables.users.contains_key(&review.user_id)
        {
            return Err(RepositoryError::NotFound);
        }
        if tables
            .reviews
            .values()
            .any(|existing| existing.book_id == review.book_id && existing.user_id == review.user_id)
        {
            return Err(RepositoryError::conflict("You have already reviewed this book"));
        }

        let now = Utc::now();
        let id = ReviewId::new(tables.next_id());
        let stored = Review {
            id,
            book_id: review.book_id,
            user_id: review.user_id,
            rating: review.rating,
            review_text: review.review_text,
            created_at: now,
            updated_at: now,
        };
        tables.reviews.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get(&self, id: ReviewId) -> Result<Review, RepositoryError> {
        self.tables
            .read()
            .await
            .reviews
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn list_for_book(&self, book_id: BookId) -> Result<Vec<Review>, RepositoryError> {
        Ok(self
            .tables
            .read()
            .await
            .reviews
            .values()
            .filter(|review| review.book_id == book_id)
            .cloned()
            .collect())
    }

    async fn list_for_book_with_reviewers(
        &self,
        book_id: BookId,
    ) -> Result<Vec<ReviewWithReviewer>, RepositoryError> {
        let tables = self.tables.read().await;
        tables
            .reviews
            .values()
            .filter(|review| review.book_id == book_id)
            .map(|review| {
                let user = tables.users.get(&review.user_id).ok_or_else(|| {
                    RepositoryError::unexpected(format!("review {} has no author", review.id))
                })?;
                Ok(ReviewWithReviewer {
                    review: review.clone(),
                    reviewer: user.reviewer(),
                })
            })
            .collect()
    }

    async fn update(
        &self,
        id: ReviewId,
        changes: ReviewUpdate,
    ) -> Result<Review, RepositoryError> {
        let mut tables = self.tables.write().await;
        let review = tables.reviews.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        changes.apply(review);
        review.updated_at = Utc::now();
        Ok(review.clone())
    }

    async fn delete(&self, id: ReviewId) -> Result<(), RepositoryError> {
        self.tables
            .write()
            .await
            .reviews
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}
