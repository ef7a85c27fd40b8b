use std::sync::Arc;

use bookreview::application::routes::app_router;
use bookreview::application::state::{AppState, AppStateConfig};
use bookreview::domain::book_items::{Book, BookDraft};
use bookreview::domain::ids::BookId;
use bookreview::domain::repositories::{BookRepository, ReviewRepository};
use bookreview::domain::reviews::{Review, ReviewDraft};
use bookreview::domain::users::{NewUser, Registration};
use bookreview::infrastructure::database::{Database, DatabasePool};
use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use tokio::net::TcpListener;
use tokio::task::AbortHandle;

pub struct TestApp {
    pub address: String,
    #[allow(dead_code)]
    pub pool: DatabasePool,
    #[allow(dead_code)]
    pub book_repo: Arc<dyn BookRepository>,
    pub review_repo: Arc<dyn ReviewRepository>,
    pub client: Client,
    server_handle: AbortHandle,
}

impl TestApp {
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.address, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}

pub async fn spawn_app() -> TestApp {
    let database = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    let pool = database.clone_pool();
    let state = AppState::from_database(&database, AppStateConfig::default());
    let book_repo = state.book_repo.clone();
    let review_repo = state.review_repo.clone();

    let app = app_router(state).expect("Failed to build router");

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let local_addr = listener.local_addr().expect("Failed to get local address");
    let address = format!("http://{local_addr}");

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Server failed to start");
    })
    .abort_handle();

    TestApp {
        address,
        pool,
        book_repo,
        review_repo,
        client: Client::new(),
        server_handle,
    }
}

/// A registered user together with their bearer token.
pub struct TestUser {
    pub registration: Registration,
}

impl TestUser {
    pub fn token(&self) -> &str {
        &self.registration.token
    }
}

pub async fn register_user(app: &TestApp, name: &str, email: &str) -> TestUser {
    let response = app
        .client
        .post(app.api_url("/auth/register"))
        .json(&NewUser::new(name, email))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 201, "registration failed for {email}");

    TestUser {
        registration: response.json().await.expect("Failed to parse registration"),
    }
}

/// POST a JSON payload as `user` and deserialize the response, asserting 201.
pub async fn create_entity<P: Serialize, R: DeserializeOwned>(
    app: &TestApp,
    user: &TestUser,
    path: &str,
    payload: &P,
) -> R {
    let response = app
        .client
        .post(app.api_url(path))
        .bearer_auth(user.token())
        .json(payload)
        .send()
        .await
        .unwrap_or_else(|e| panic!("failed to create entity at {path}: {e}"));
    assert_eq!(response.status(), 201, "unexpected status creating {path}");

    response
        .json()
        .await
        .unwrap_or_else(|e| panic!("failed to deserialize entity from {path}: {e}"))
}

pub fn book_draft(title: &str) -> BookDraft {
    BookDraft {
        title: Some(title.to_string()),
        author: Some("Octavia E. Butler".to_string()),
        description: Some("A novel".to_string()),
        genre: Some("Science Fiction".to_string()),
        published_year: Some(1993),
    }
}

pub async fn create_book(app: &TestApp, user: &TestUser, title: &str) -> Book {
    create_entity(app, user, "/books", &book_draft(title)).await
}

pub async fn create_review(
    app: &TestApp,
    user: &TestUser,
    book_id: BookId,
    rating: i64,
) -> Review {
    let draft = ReviewDraft {
        book_id: Some(book_id),
        rating: Some(rating),
        review_text: Some(format!("{rating} stars")),
    };
    create_entity(app, user, "/reviews", &draft).await
}
