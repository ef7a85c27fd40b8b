pub(crate) mod auth;
pub(crate) mod books;
pub(crate) mod reviews;

use axum::routing::{get, post, put};
use serde::{Deserialize, Serialize};

use crate::application::state::AppState;

/// Body of successful delete responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub(super) fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/me", get(auth::me))
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/{id}",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .route("/reviews", post(reviews::create_review))
        .route(
            "/reviews/{id}",
            put(reviews::update_review).delete(reviews::delete_review),
        )
}
