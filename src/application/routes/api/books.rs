use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use tracing::info;

use super::MessageResponse;
use crate::application::auth::AuthenticatedUser;
use crate::application::errors::ApiError;
use crate::application::state::AppState;
use crate::domain::book_items::{Book, BookChanges, BookDetail, BookDraft, BookPage};
use crate::domain::ids::BookId;
use crate::domain::listing::PageNumber;

/// `pageNumber` is kept raw so malformed values fall back to the first page
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListQuery {
    #[serde(rename = "pageNumber")]
    page_number: Option<String>,
}

#[tracing::instrument(skip(state))]
pub(crate) async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<BookPage>, ApiError> {
    let page = PageNumber::parse(query.page_number.as_deref());
    let books = state.listing_service.list(page).await?;
    Ok(Json(books))
}

#[tracing::instrument(skip(state))]
pub(crate) async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<BookId>,
) -> Result<Json<BookDetail>, ApiError> {
    let detail = state.detail_service.get_detail(id).await?;
    Ok(Json(detail))
}

#[tracing::instrument(skip(state, auth_user, draft))]
pub(crate) async fn create_book(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(draft): Json<BookDraft>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let book = state.book_service.create(draft, auth_user.user().id).await?;

    info!(book_id = %book.id, title = %book.title, "book created");
    Ok((StatusCode::CREATED, Json(book)))
}

#[tracing::instrument(skip(state, auth_user, changes))]
pub(crate) async fn update_book(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<BookId>,
    Json(changes): Json<BookChanges>,
) -> Result<Json<Book>, ApiError> {
    let book = state
        .book_service
        .update(id, changes, auth_user.user().id)
        .await?;

    info!(%id, "book updated");
    Ok(Json(book))
}

#[tracing::instrument(skip(state, auth_user))]
pub(crate) async fn delete_book(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<BookId>,
) -> Result<Json<MessageResponse>, ApiError> {
    let reviews_removed = state.book_service.delete(id, auth_user.user().id).await?;

    info!(%id, reviews_removed, "book deleted");
    Ok(Json(MessageResponse::new(
        "Book and associated reviews removed",
    )))
}
