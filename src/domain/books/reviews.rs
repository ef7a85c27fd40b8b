use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{BookId, ReviewId, UserId};
use crate::domain::ratings::{Rating, RatingOutOfRange};
use crate::domain::users::Reviewer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub book_id: BookId,
    pub user_id: UserId,
    pub rating: Rating,
    pub review_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewWithReviewer {
    #[serde(flatten)]
    pub review: Review,
    pub reviewer: Reviewer,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidReview {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error(transparent)]
    Rating(#[from] RatingOutOfRange),
}

/// Unvalidated review fields as submitted by a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_id: Option<BookId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
}

impl ReviewDraft {
    pub fn validate(self, user_id: UserId) -> Result<NewReview, InvalidReview> {
        let book_id = self.book_id.ok_or(InvalidReview::MissingField("bookId"))?;
        let rating = Rating::new(self.rating.ok_or(InvalidReview::MissingField("rating"))?)?;
        let review_text =
            trimmed(self.review_text).ok_or(InvalidReview::MissingField("reviewText"))?;

        Ok(NewReview {
            book_id,
            user_id,
            rating,
            review_text,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub book_id: BookId,
    pub user_id: UserId,
    pub rating: Rating,
    pub review_text: String,
}

/// Raw partial update for a review.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
}

impl ReviewChanges {
    /// A provided rating must be in range; blank text keeps the stored text.
    pub fn validate(self) -> Result<ReviewUpdate, InvalidReview> {
        let rating = self.rating.map(Rating::new).transpose()?;
        Ok(ReviewUpdate {
            rating,
            review_text: trimmed(self.review_text),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewUpdate {
    pub rating: Option<Rating>,
    pub review_text: Option<String>,
}

impl ReviewUpdate {
    pub fn is_empty(&self) -> bool {
        self.rating.is_none() && self.review_text.is_none()
    }

    pub fn apply(&self, review: &mut Review) {
        if let Some(rating) = self.rating {
            review.rating = rating;
        }
        if let Some(text) = &self.review_text {
            review.review_text.clone_from(text);
        }
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|text| !text.is_empty())
}
