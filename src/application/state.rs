use std::sync::Arc;

use crate::application::services::{
    AccountService, BookDetailService, BookListingService, BookService, RatingAggregator,
    ReviewService,
};
use crate::domain::repositories::{
    BookRepository, ReviewRepository, TokenRepository, UserRepository,
};
use crate::infrastructure::database::Database;
use crate::infrastructure::repositories::{
    InMemoryStore, SqlBookRepository, SqlReviewRepository, SqlTokenRepository, SqlUserRepository,
};

/// Settings that vary between deployments. Repositories and services are
/// derived from the store.
#[derive(Debug, Clone)]
pub struct AppStateConfig {
    /// Browser origin allowed to call the API cross-origin.
    pub cors_origin: String,
}

impl Default for AppStateConfig {
    fn default() -> Self {
        Self {
            cors_origin: "http://localhost:5173".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub book_repo: Arc<dyn BookRepository>,
    pub review_repo: Arc<dyn ReviewRepository>,
    pub account_service: AccountService,
    pub listing_service: BookListingService,
    pub detail_service: BookDetailService,
    pub book_service: BookService,
    pub review_service: ReviewService,
    pub cors_origin: String,
}

impl AppState {
    /// Build the full application state from a database connection and config.
    pub fn from_database(database: &Database, config: AppStateConfig) -> Self {
        let pool = database.clone_pool();

        Self::from_repositories(
            Arc::new(SqlUserRepository::new(pool.clone())),
            Arc::new(SqlTokenRepository::new(pool.clone())),
            Arc::new(SqlBookRepository::new(pool.clone())),
            Arc::new(SqlReviewRepository::new(pool)),
            config,
        )
    }

    /// State backed by a single process-local store. Nothing survives a restart.
    pub fn in_memory(config: AppStateConfig) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::from_repositories(
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            config,
        )
    }

    pub fn from_repositories(
        user_repo: Arc<dyn UserRepository>,
        token_repo: Arc<dyn TokenRepository>,
        book_repo: Arc<dyn BookRepository>,
        review_repo: Arc<dyn ReviewRepository>,
        config: AppStateConfig,
    ) -> Self {
        let aggregator = RatingAggregator::new(Arc::clone(&review_repo));

        let account_service = AccountService::new(user_repo, token_repo);
        let listing_service = BookListingService::new(Arc::clone(&book_repo), aggregator);
        let detail_service =
            BookDetailService::new(Arc::clone(&book_repo), Arc::clone(&review_repo));
        let book_service = BookService::new(Arc::clone(&book_repo));
        let review_service = ReviewService::new(Arc::clone(&review_repo), Arc::clone(&book_repo));

        Self {
            book_repo,
            review_repo,
            account_service,
            listing_service,
            detail_service,
            book_service,
            review_service,
            cors_origin: config.cors_origin,
        }
    }
}
