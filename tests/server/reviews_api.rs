use bookreview::domain::ids::BookId;
use bookreview::domain::reviews::{Review, ReviewDraft};
use serde_json::{Value, json};

use crate::helpers::{create_book, create_review, register_user, spawn_app};

fn draft(book_id: BookId, rating: i64) -> ReviewDraft {
    ReviewDraft {
        book_id: Some(book_id),
        rating: Some(rating),
        review_text: Some("Memorable".to_string()),
    }
}

#[tokio::test]
async fn creating_a_review_returns_201() {
    let app = spawn_app().await;
    let owner = register_user(&app, "Owner", "owner@example.com").await;
    let reader = register_user(&app, "Reader", "reader@example.com").await;
    let book = create_book(&app, &owner, "Lilith's Brood").await;

    let response = app
        .client
        .post(app.api_url("/reviews"))
        .bearer_auth(reader.token())
        .json(&draft(book.id, 5))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 201);
    let review: Review = response.json().await.unwrap();
    assert_eq!(review.book_id, book.id);
    assert_eq!(review.user_id, reader.registration.user.id);
    assert_eq!(review.rating.value(), 5);
}

#[tokio::test]
async fn second_review_of_same_book_is_409_and_first_is_kept() {
    let app = spawn_app().await;
    let owner = register_user(&app, "Owner", "owner@example.com").await;
    let book = create_book(&app, &owner, "Once Only").await;
    let first = create_review(&app, &owner, book.id, 4).await;

    let response = app
        .client
        .post(app.api_url("/reviews"))
        .bearer_auth(owner.token())
        .json(&draft(book.id, 1))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "You have already reviewed this book");
    let stored = app.review_repo.list_for_book(book.id).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, first.id);
    assert_eq!(stored[0].rating.value(), 4);
}

#[tokio::test]
async fn concurrent_duplicate_reviews_leave_exactly_one() {
    let app = spawn_app().await;
    let owner = register_user(&app, "Owner", "owner@example.com").await;
    let book = create_book(&app, &owner, "Racy").await;

    let send = |rating| {
        app.client
            .post(app.api_url("/reviews"))
            .bearer_auth(owner.token())
            .json(&draft(book.id, rating))
            .send()
    };
    let (a, b) = tokio::join!(send(2), send(3));
    let mut statuses = [a.unwrap().status().as_u16(), b.unwrap().status().as_u16()];
    statuses.sort_unstable();

    assert_eq!(statuses, [201, 409]);
    assert_eq!(app.review_repo.list_for_book(book.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn out_of_range_ratings_are_400() {
    let app = spawn_app().await;
    let owner = register_user(&app, "Owner", "owner@example.com").await;
    let book = create_book(&app, &owner, "Graded").await;

    for rating in [0, 6] {
        let response = app
            .client
            .post(app.api_url("/reviews"))
            .bearer_auth(owner.token())
            .json(&draft(book.id, rating))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), 400, "rating {rating}");
    }
}

#[tokio::test]
async fn review_of_missing_book_is_404() {
    let app = spawn_app().await;
    let reader = register_user(&app, "Reader", "reader@example.com").await;

    let response = app
        .client
        .post(app.api_url("/reviews"))
        .bearer_auth(reader.token())
        .json(&draft(BookId::new(404), 3))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn review_without_token_is_401() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.api_url("/reviews"))
        .json(&draft(BookId::new(1), 3))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn owner_updates_review_and_detail_reflects_it() {
    let app = spawn_app().await;
    let owner = register_user(&app, "Owner", "owner@example.com").await;
    let book = create_book(&app, &owner, "Revisited").await;
    let review = create_review(&app, &owner, book.id, 2).await;

    let response = app
        .client
        .put(app.api_url(&format!("/reviews/{}", review.id)))
        .bearer_auth(owner.token())
        .json(&json!({"rating": 5, "reviewText": "Better the second time"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let updated: Review = response.json().await.unwrap();
    assert_eq!(updated.rating.value(), 5);
    assert_eq!(updated.review_text, "Better the second time");

    let detail: Value = app
        .client
        .get(app.api_url(&format!("/books/{}", book.id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(detail["averageRating"], 5.0);
}

#[tokio::test]
async fn non_owner_cannot_touch_a_review() {
    let app = spawn_app().await;
    let owner = register_user(&app, "Owner", "owner@example.com").await;
    let intruder = register_user(&app, "Intruder", "intruder@example.com").await;
    let book = create_book(&app, &owner, "Guarded").await;
    let review = create_review(&app, &owner, book.id, 4).await;
    let url = app.api_url(&format!("/reviews/{}", review.id));

    let update = app
        .client
        .put(&url)
        .bearer_auth(intruder.token())
        .json(&json!({"rating": 1}))
        .send()
        .await
        .unwrap();
    let delete = app
        .client
        .delete(&url)
        .bearer_auth(intruder.token())
        .send()
        .await
        .unwrap();

    assert_eq!(update.status(), 403);
    assert_eq!(delete.status(), 403);
    let stored = app.review_repo.get(review.id).await.unwrap();
    assert_eq!(stored.rating.value(), 4);
}

#[tokio::test]
async fn owner_deletes_review() {
    let app = spawn_app().await;
    let owner = register_user(&app, "Owner", "owner@example.com").await;
    let book = create_book(&app, &owner, "Retracted").await;
    let review = create_review(&app, &owner, book.id, 1).await;

    let response = app
        .client
        .delete(app.api_url(&format!("/reviews/{}", review.id)))
        .bearer_auth(owner.token())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Review removed");
    assert!(app.review_repo.list_for_book(book.id).await.unwrap().is_empty());
}
