use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::UserId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Missing fields deserialize as empty so validation can name them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Returned once at registration; the raw token is never shown again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub user: User,
    pub token: String,
}

/// Public identity of a book's creator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Public identity of a review's author; never carries the email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reviewer {
    pub id: UserId,
    pub name: String,
}

impl User {
    pub fn creator(&self) -> Creator {
        Creator {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }

    pub fn reviewer(&self) -> Reviewer {
        Reviewer {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Trims both fields and lower-cases the email so uniqueness is
    /// case-insensitive.
    pub fn normalize(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
        }
    }

    /// Name of the first missing field, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            Some("name")
        } else if self.email.trim().is_empty() {
            Some("email")
        } else {
            None
        }
    }
}
