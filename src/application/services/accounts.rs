use std::sync::Arc;

use crate::application::errors::AppError;
use crate::domain::RepositoryError;
use crate::domain::repositories::{TokenRepository, UserRepository};
use crate::domain::users::{NewUser, Registration, User};
use crate::infrastructure::auth::{generate_token, hash_token};

/// Registration and bearer-token resolution.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenRepository>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenRepository>) -> Self {
        Self { users, tokens }
    }

    /// Creates the user and issues their first API token. The raw token is
    /// only ever returned here.
    pub async fn register(&self, new_user: NewUser) -> Result<Registration, AppError> {
        let new_user = new_user.normalize();
        if let Some(field) = new_user.missing_field() {
            return Err(AppError::validation(format!("{field} is required")));
        }

        let token = generate_token();
        let user = self
            .users
            .insert_with_token(new_user, hash_token(&token))
            .await?;

        Ok(Registration { user, token })
    }

    /// Resolves a raw bearer token to its user. Unknown tokens are
    /// `Unauthenticated`.
    pub async fn authenticate(&self, raw_token: &str) -> Result<User, AppError> {
        let token = self
            .tokens
            .get_by_token_hash(&hash_token(raw_token))
            .await
            .map_err(|err| match err {
                RepositoryError::NotFound => AppError::Unauthenticated,
                other => AppError::from(other),
            })?;

        self.users.get(token.user_id).await.map_err(|err| match err {
            RepositoryError::NotFound => AppError::Unauthenticated,
            other => AppError::from(other),
        })
    }
}
