use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::{Span, warn};

use crate::application::errors::{ApiError, AppError};
use crate::application::state::AppState;
use crate::domain::users::User;

/// The caller identified by a `Bearer` token. Extraction fails with 401
/// before the handler body runs.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    pub fn user(&self) -> &User {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            Span::current().record("user.id", tracing::field::display(&user.0.id));
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AppError::Unauthenticated)?;

        let auth_str = auth_header.to_str().map_err(|err| {
            warn!(error = %err, "authorization header contains invalid characters");
            AppError::Unauthenticated
        })?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AppError::Unauthenticated)?;

        let user = state.account_service.authenticate(token).await.map_err(|err| {
            if !matches!(err, AppError::Unauthenticated) {
                warn!(error = %err, "bearer token lookup failed");
            }
            err
        })?;

        Span::current().record("user.id", tracing::field::display(&user.id));
        let auth = AuthenticatedUser(user);
        parts.extensions.insert(auth.clone());
        Ok(auth)
    }
}
