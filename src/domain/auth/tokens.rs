use chrono::{DateTime, Utc};

use crate::domain::ids::{TokenId, UserId};

/// A stored API token. Only the hash of the bearer value is kept.
#[derive(Debug, Clone)]
pub struct Token {
    pub id: TokenId,
    pub user_id: UserId,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
}
