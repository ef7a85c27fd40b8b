use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::query_as;

use crate::domain::RepositoryError;
use crate::domain::ids::{TokenId, UserId};
use crate::domain::repositories::TokenRepository;
use crate::domain::tokens::Token;
use crate::infrastructure::database::DatabasePool;

#[derive(Clone)]
pub struct SqlTokenRepository {
    pool: DatabasePool,
}

impl SqlTokenRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn to_domain(record: TokenRecord) -> Token {
        Token {
            id: TokenId::new(record.id),
            user_id: UserId::new(record.user_id),
            token_hash: record.token_hash,
            created_at: record.created_at,
        }
    }
}

#[async_trait]
impl TokenRepository for SqlTokenRepository {
    async fn get_by_token_hash(&self, token_hash: &str) -> Result<Token, RepositoryError> {
        let record = query_as::<_, TokenRecord>(
            "SELECT id, user_id, token_hash, created_at FROM api_tokens WHERE token_hash = ?",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| RepositoryError::unexpected(err.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(Self::to_domain(record))
    }
}

#[derive(sqlx::FromRow)]
struct TokenRecord {
    id: i64,
    user_id: i64,
    token_hash: String,
    created_at: DateTime<Utc>,
}
