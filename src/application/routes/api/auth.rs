use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

use crate::application::auth::AuthenticatedUser;
use crate::application::errors::ApiError;
use crate::application::state::AppState;
use crate::domain::users::{NewUser, Registration, User};

#[tracing::instrument(skip(state, new_user))]
pub(crate) async fn register(
    State(state): State<AppState>,
    Json(new_user): Json<NewUser>,
) -> Result<(StatusCode, Json<Registration>), ApiError> {
    let registration = state.account_service.register(new_user).await?;

    info!(user_id = %registration.user.id, "user registered");
    Ok((StatusCode::CREATED, Json(registration)))
}

#[tracing::instrument(skip(auth_user))]
pub(crate) async fn me(auth_user: AuthenticatedUser) -> Json<User> {
    Json(auth_user.0)
}
