use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{BookId, UserId};
use crate::domain::ratings::RatingSummary;
use crate::domain::reviews::ReviewWithReviewer;
use crate::domain::users::Creator;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: String,
    pub genre: String,
    pub published_year: i32,
    /// Set once at creation; never rewritten.
    pub added_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A book with its creator's public identity in place of the bare id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookWithCreator {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: String,
    pub genre: String,
    pub published_year: i32,
    pub added_by: Creator,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookWithCreator {
    pub fn new(book: Book, creator: Creator) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            description: book.description,
            genre: book.genre,
            published_year: book.published_year,
            added_by: creator,
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

/// Catalogue entry: a book merged with its live rating aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookWithRating {
    #[serde(flatten)]
    pub book: BookWithCreator,
    #[serde(flatten)]
    pub rating: RatingSummary,
}

/// One page of the catalogue. `pages` counts every page, not just this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookPage {
    pub books: Vec<BookWithRating>,
    pub page: u32,
    pub pages: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetail {
    pub book: BookWithCreator,
    pub reviews: Vec<ReviewWithReviewer>,
    pub average_rating: f64,
}

/// Unvalidated book fields as submitted by a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0} is required")]
pub struct MissingBookField(pub &'static str);

impl BookDraft {
    /// Checks every required field and stamps the creator.
    pub fn validate(self, added_by: UserId) -> Result<NewBook, MissingBookField> {
        Ok(NewBook {
            title: required_text(self.title, "title")?,
            author: required_text(self.author, "author")?,
            description: required_text(self.description, "description")?,
            genre: required_text(self.genre, "genre")?,
            published_year: self.published_year.ok_or(MissingBookField("publishedYear"))?,
            added_by,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub description: String,
    pub genre: String,
    pub published_year: i32,
    pub added_by: UserId,
}

/// Partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
}

impl BookChanges {
    /// Trims text fields and drops the empty ones so they leave the stored
    /// value alone. A provided `published_year` is always kept, zero included.
    pub fn normalize(self) -> Self {
        Self {
            title: non_empty(self.title),
            author: non_empty(self.author),
            description: non_empty(self.description),
            genre: non_empty(self.genre),
            published_year: self.published_year,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.description.is_none()
            && self.genre.is_none()
            && self.published_year.is_none()
    }

    pub fn apply(&self, book: &mut Book) {
        if let Some(title) = &self.title {
            book.title.clone_from(title);
        }
        if let Some(author) = &self.author {
            book.author.clone_from(author);
        }
        if let Some(description) = &self.description {
            book.description.clone_from(description);
        }
        if let Some(genre) = &self.genre {
            book.genre.clone_from(genre);
        }
        if let Some(year) = self.published_year {
            book.published_year = year;
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, MissingBookField> {
    non_empty(value).ok_or(MissingBookField(field))
}
