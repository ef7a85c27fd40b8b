use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, query, query_as};

use crate::domain::RepositoryError;
use crate::domain::ids::{BookId, ReviewId, UserId};
use crate::domain::ratings::Rating;
use crate::domain::repositories::ReviewRepository;
use crate::domain::reviews::{NewReview, Review, ReviewUpdate, ReviewWithReviewer};
use crate::domain::users::Reviewer;
use crate::infrastructure::database::DatabasePool;
use crate::infrastructure::repositories::macros::push_update_field;

const REVIEW_COLUMNS: &str =
    "r.id, r.book_id, r.user_id, r.rating, r.review_text, r.created_at, r.updated_at";

#[derive(Clone)]
pub struct SqlReviewRepository {
    pool: DatabasePool,
}

impl SqlReviewRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn to_domain(record: ReviewRecord) -> Result<Review, RepositoryError> {
        let rating = Rating::new(record.rating).map_err(|err| {
            RepositoryError::unexpected(format!("invalid stored rating for review {}: {err}", record.id))
        })?;

        Ok(Review {
            id: ReviewId::new(record.id),
            book_id: BookId::new(record.book_id),
            user_id: UserId::new(record.user_id),
            rating,
            review_text: record.review_text,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

#[async_trait]
impl ReviewRepository for SqlReviewRepository {
    async fn insert(&self, review: NewReview) -> Result<Review, RepositoryError> {
        let now = Utc::now();

        let record = query_as::<_, ReviewRecord>(
            r"INSERT INTO reviews (book_id, user_id, rating, review_text, created_at, updated_at)
              VALUES (?, ?, ?, ?, ?, ?)
              RETURNING id, book_id, user_id, rating, review_text, created_at, updated_at",
        )
        .bind(i64::from(review.book_id))
        .bind(i64::from(review.user_id))
        .bind(i64::from(review.rating))
        .bind(&review.review_text)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if let sqlx::Error::Database(db_err) = &err {
                if db_err.is_unique_violation() {
                    return RepositoryError::conflict("You have already reviewed this book");
                }
                if db_err.is_foreign_key_violation() {
                    return RepositoryError::NotFound;
                }
            }
            RepositoryError::unexpected(err.to_string())
        })?;

        Self::to_domain(record)
    }

    async fn get(&self, id: ReviewId) -> Result<Review, RepositoryError> {
        let record = query_as::<_, ReviewRecord>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews r WHERE r.id = ?"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| RepositoryError::unexpected(err.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        Self::to_domain(record)
    }

    async fn list_for_book(&self, book_id: BookId) -> Result<Vec<Review>, RepositoryError> {
        let records = query_as::<_, ReviewRecord>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews r WHERE r.book_id = ? ORDER BY r.id ASC"
        ))
        .bind(i64::from(book_id))
        .fetch_all(&self.pool)
        .await
        .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        records.into_iter().map(Self::to_domain).collect()
    }

    async fn list_for_book_with_reviewers(
        &self,
        book_id: BookId,
    ) -> Result<Vec<ReviewWithReviewer>, RepositoryError> {
        let records = query_as::<_, ReviewWithReviewerRecord>(&format!(
            r"SELECT {REVIEW_COLUMNS}, u.name AS reviewer_name
              FROM reviews r
              JOIN users u ON u.id = r.user_id
              WHERE r.book_id = ?
              ORDER BY r.id ASC"
        ))
        .bind(i64::from(book_id))
        .fetch_all(&self.pool)
        .await
        .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        records
            .into_iter()
            .map(|record| {
                let reviewer = Reviewer {
                    id: UserId::new(record.review.user_id),
                    name: record.reviewer_name,
                };
                Ok(ReviewWithReviewer {
                    review: Self::to_domain(record.review)?,
                    reviewer,
                })
            })
            .collect()
    }

    async fn update(
        &self,
        id: ReviewId,
        changes: ReviewUpdate,
    ) -> Result<Review, RepositoryError> {
        let mut builder = QueryBuilder::new("UPDATE reviews SET ");
        let mut sep = false;

        push_update_field!(builder, sep, "rating", changes.rating.map(i64::from));
        push_update_field!(builder, sep, "review_text", changes.review_text);
        push_update_field!(builder, sep, "updated_at", Some(Utc::now()));

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get(id).await
    }

    async fn delete(&self, id: ReviewId) -> Result<(), RepositoryError> {
        let result = query("DELETE FROM reviews WHERE id = ?")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct ReviewRecord {
    id: i64,
    book_id: i64,
    user_id: i64,
    rating: i64,
    review_text: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct ReviewWithReviewerRecord {
    #[sqlx(flatten)]
    review: ReviewRecord,
    reviewer_name: String,
}
