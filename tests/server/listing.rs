use bookreview::domain::book_items::BookPage;
use serde_json::Value;

use crate::helpers::{TestApp, TestUser, create_book, create_review, register_user, spawn_app};

async fn seed_books(app: &TestApp, owner: &TestUser, count: usize) {
    for n in 1..=count {
        create_book(app, owner, &format!("Book {n:02}")).await;
    }
}

async fn fetch(app: &TestApp, query: &str) -> BookPage {
    let response = app
        .client
        .get(format!("{}{query}", app.api_url("/books")))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 200);
    response.json().await.expect("Failed to parse page")
}

#[tokio::test]
async fn twelve_books_make_three_pages() {
    let app = spawn_app().await;
    let owner = register_user(&app, "Owner", "owner@example.com").await;
    seed_books(&app, &owner, 12).await;

    let first = fetch(&app, "?pageNumber=1").await;
    let third = fetch(&app, "?pageNumber=3").await;
    let fourth = fetch(&app, "?pageNumber=4").await;

    assert_eq!((first.books.len(), first.page, first.pages), (5, 1, 3));
    assert_eq!(first.books[0].book.title, "Book 01");
    assert_eq!((third.books.len(), third.page, third.pages), (2, 3, 3));
    assert_eq!(third.books[1].book.title, "Book 12");
    assert!(fourth.books.is_empty());
    assert_eq!((fourth.page, fourth.pages), (4, 3));
}

#[tokio::test]
async fn invalid_page_numbers_fall_back_to_first_page() {
    let app = spawn_app().await;
    let owner = register_user(&app, "Owner", "owner@example.com").await;
    seed_books(&app, &owner, 6).await;

    for query in ["", "?pageNumber=abc", "?pageNumber=0", "?pageNumber=-2", "?pageNumber=1.5"] {
        let page = fetch(&app, query).await;
        assert_eq!(page.page, 1, "query {query:?}");
        assert_eq!(page.books.len(), 5, "query {query:?}");
    }
}

#[tokio::test]
async fn page_numbers_beyond_u32_are_past_the_end() {
    let app = spawn_app().await;
    let owner = register_user(&app, "Owner", "owner@example.com").await;
    seed_books(&app, &owner, 6).await;

    let page = fetch(&app, "?pageNumber=5000000000").await;

    assert!(page.books.is_empty());
    assert_eq!((page.page, page.pages), (u32::MAX, 2));
}

#[tokio::test]
async fn empty_catalogue_has_zero_pages() {
    let app = spawn_app().await;

    let page = fetch(&app, "").await;

    assert!(page.books.is_empty());
    assert_eq!((page.page, page.pages), (1, 0));
}

#[tokio::test]
async fn entries_carry_creator_and_rating_fields() {
    let app = spawn_app().await;
    let owner = register_user(&app, "Owner", "owner@example.com").await;
    let reader = register_user(&app, "Reader", "reader@example.com").await;
    let book = create_book(&app, &owner, "Popular").await;
    create_review(&app, &owner, book.id, 5).await;
    create_review(&app, &reader, book.id, 4).await;

    let body: Value = app
        .client
        .get(app.api_url("/books"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let entry = &body["books"][0];
    assert_eq!(entry["title"], "Popular");
    assert_eq!(entry["addedBy"]["name"], "Owner");
    assert_eq!(entry["addedBy"]["email"], "owner@example.com");
    assert_eq!(entry["averageRating"], 4.5);
    assert_eq!(entry["numReviews"], 2);
}
