use bookreview::domain::book_items::{Book, BookChanges, BookDetail};
use bookreview::domain::ids::BookId;
use serde_json::{Value, json};

use crate::helpers::{
    book_draft, create_book, create_review, register_user, spawn_app,
};

#[tokio::test]
async fn creating_a_book_returns_201_and_records_the_creator() {
    let app = spawn_app().await;
    let owner = register_user(&app, "Owner", "owner@example.com").await;

    let response = app
        .client
        .post(app.api_url("/books"))
        .bearer_auth(owner.token())
        .json(&book_draft("Parable of the Sower"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 201);
    let book: Book = response.json().await.unwrap();
    assert_eq!(book.title, "Parable of the Sower");
    assert_eq!(book.published_year, 1993);
    assert_eq!(book.added_by, owner.registration.user.id);
}

#[tokio::test]
async fn creating_a_book_without_token_is_401() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.api_url("/books"))
        .json(&book_draft("Anonymous"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn creating_a_book_with_missing_fields_is_400() {
    let app = spawn_app().await;
    let owner = register_user(&app, "Owner", "owner@example.com").await;

    let response = app
        .client
        .post(app.api_url("/books"))
        .bearer_auth(owner.token())
        .json(&json!({"title": "Only a title"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "author is required");
}

#[tokio::test]
async fn detail_round_trips_fields_and_creator() {
    let app = spawn_app().await;
    let owner = register_user(&app, "Owner", "owner@example.com").await;
    let reader = register_user(&app, "Reader", "reader@example.com").await;
    let book = create_book(&app, &owner, "Kindred").await;
    create_review(&app, &owner, book.id, 3).await;
    create_review(&app, &reader, book.id, 4).await;

    let response = app
        .client
        .get(app.api_url(&format!("/books/{}", book.id)))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let detail: BookDetail = response.json().await.unwrap();
    assert_eq!(detail.book.title, "Kindred");
    assert_eq!(detail.book.author, book.author);
    assert_eq!(detail.book.added_by.id, owner.registration.user.id);
    assert_eq!(detail.book.added_by.name, "Owner");
    assert_eq!(detail.reviews.len(), 2);
    assert_eq!(detail.reviews[1].reviewer.name, "Reader");
    assert!((detail.average_rating - 3.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn detail_of_missing_book_is_404() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.api_url("/books/999"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn owner_partial_update_skips_empty_strings() {
    let app = spawn_app().await;
    let owner = register_user(&app, "Owner", "owner@example.com").await;
    let book = create_book(&app, &owner, "Dawn").await;

    let response = app
        .client
        .put(app.api_url(&format!("/books/{}", book.id)))
        .bearer_auth(owner.token())
        .json(&json!({"title": "", "genre": "Xenofiction", "publishedYear": 1987}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let updated: Book = response.json().await.unwrap();
    assert_eq!(updated.title, "Dawn");
    assert_eq!(updated.genre, "Xenofiction");
    assert_eq!(updated.published_year, 1987);
    assert_eq!(updated.added_by, owner.registration.user.id);
}

#[tokio::test]
async fn non_owner_update_is_403_and_changes_nothing() {
    let app = spawn_app().await;
    let owner = register_user(&app, "Owner", "owner@example.com").await;
    let intruder = register_user(&app, "Intruder", "intruder@example.com").await;
    let book = create_book(&app, &owner, "Fledgling").await;

    let changes = BookChanges {
        title: Some("Hijacked".to_string()),
        ..BookChanges::default()
    };
    let response = app
        .client
        .put(app.api_url(&format!("/books/{}", book.id)))
        .bearer_auth(intruder.token())
        .json(&changes)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 403);
    let stored = app.book_repo.get(book.id).await.unwrap();
    assert_eq!(stored.title, "Fledgling");
}

#[tokio::test]
async fn deleting_a_book_removes_its_reviews() {
    let app = spawn_app().await;
    let owner = register_user(&app, "Owner", "owner@example.com").await;
    let reader = register_user(&app, "Reader", "reader@example.com").await;
    let doomed = create_book(&app, &owner, "Doomed").await;
    let survivor = create_book(&app, &owner, "Survivor").await;
    create_review(&app, &reader, doomed.id, 5).await;
    create_review(&app, &reader, survivor.id, 2).await;

    let response = app
        .client
        .delete(app.api_url(&format!("/books/{}", doomed.id)))
        .bearer_auth(owner.token())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Book and associated reviews removed");

    let detail = app
        .client
        .get(app.api_url(&format!("/books/{}", doomed.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(detail.status(), 404);
    assert!(app.review_repo.list_for_book(doomed.id).await.unwrap().is_empty());
    assert_eq!(app.review_repo.list_for_book(survivor.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn non_owner_delete_is_403() {
    let app = spawn_app().await;
    let owner = register_user(&app, "Owner", "owner@example.com").await;
    let intruder = register_user(&app, "Intruder", "intruder@example.com").await;
    let book = create_book(&app, &owner, "Wild Seed").await;

    let response = app
        .client
        .delete(app.api_url(&format!("/books/{}", book.id)))
        .bearer_auth(intruder.token())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 403);
    assert!(app.book_repo.get(book.id).await.is_ok());
}

#[tokio::test]
async fn deleting_a_missing_book_is_404() {
    let app = spawn_app().await;
    let owner = register_user(&app, "Owner", "owner@example.com").await;

    let response = app
        .client
        .delete(app.api_url(&format!("/books/{}", BookId::new(41))))
        .bearer_auth(owner.token())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.api_url("/books"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");
}
