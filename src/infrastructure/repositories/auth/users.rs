use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{query, query_as};

use crate::domain::RepositoryError;
use crate::domain::ids::UserId;
use crate::domain::repositories::UserRepository;
use crate::domain::users::{NewUser, User};
use crate::infrastructure::database::DatabasePool;

#[derive(Clone)]
pub struct SqlUserRepository {
    pool: DatabasePool,
}

impl SqlUserRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn to_domain(record: UserRecord) -> User {
        User {
            id: UserId::new(record.id),
            name: record.name,
            email: record.email,
            created_at: record.created_at,
        }
    }
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn insert_with_token(
        &self,
        user: NewUser,
        token_hash: String,
    ) -> Result<User, RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|err| RepositoryError::unexpected(err.to_string()))?;
        let now = Utc::now();

        let record = query_as::<_, UserRecord>(
            r"INSERT INTO users (name, email, created_at)
              VALUES (?, ?, ?)
              RETURNING id, name, email, created_at",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            if let sqlx::Error::Database(db_err) = &err
                && db_err.is_unique_violation()
            {
                return RepositoryError::conflict("A user with this email already exists");
            }
            RepositoryError::unexpected(err.to_string())
        })?;

        query("INSERT INTO api_tokens (user_id, token_hash, created_at) VALUES (?, ?, ?)")
            .bind(record.id)
            .bind(&token_hash)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        tx.commit()
            .await
            .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        Ok(Self::to_domain(record))
    }

    async fn get(&self, id: UserId) -> Result<User, RepositoryError> {
        let record = query_as::<_, UserRecord>(
            "SELECT id, name, email, created_at FROM users WHERE id = ?",
        )
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| RepositoryError::unexpected(err.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(Self::to_domain(record))
    }
}

#[derive(sqlx::FromRow)]
struct UserRecord {
    id: i64,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
}
