use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::info;

use super::MessageResponse;
use crate::application::auth::AuthenticatedUser;
use crate::application::errors::ApiError;
use crate::application::state::AppState;
use crate::domain::ids::ReviewId;
use crate::domain::reviews::{Review, ReviewChanges, ReviewDraft};

#[tracing::instrument(skip(state, auth_user, draft))]
pub(crate) async fn create_review(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(draft): Json<ReviewDraft>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let review = state
        .review_service
        .create(draft, auth_user.user().id)
        .await?;

    info!(review_id = %review.id, book_id = %review.book_id, rating = %review.rating, "review created");
    Ok((StatusCode::CREATED, Json(review)))
}

#[tracing::instrument(skip(state, auth_user, changes))]
pub(crate) async fn update_review(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<ReviewId>,
    Json(changes): Json<ReviewChanges>,
) -> Result<Json<Review>, ApiError> {
    let review = state
        .review_service
        .update(id, changes, auth_user.user().id)
        .await?;

    info!(%id, "review updated");
    Ok(Json(review))
}

#[tracing::instrument(skip(state, auth_user))]
pub(crate) async fn delete_review(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<ReviewId>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .review_service
        .delete(id, auth_user.user().id)
        .await?;

    info!(%id, "review deleted");
    Ok(Json(MessageResponse::new("Review removed")))
}
