use std::fmt;

use serde::{Deserialize, Serialize};

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// A review score, always within `MIN_RATING..=MAX_RATING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rating must be between 1 and 5, got {0}")]
pub struct RatingOutOfRange(pub i64);

impl Rating {
    pub fn new(value: i64) -> Result<Self, RatingOutOfRange> {
        if (MIN_RATING..=MAX_RATING).contains(&value) {
            // Range-checked above, the cast cannot truncate.
            Ok(Self(value as u8))
        } else {
            Err(RatingOutOfRange(value))
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        i64::from(rating.0)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Average score and review count for a single book, derived from its reviews
/// at read time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub average_rating: f64,
    pub num_reviews: u64,
}

impl RatingSummary {
    pub const EMPTY: RatingSummary = RatingSummary {
        average_rating: 0.0,
        num_reviews: 0,
    };

    /// Mean of `ratings` rounded to one decimal place, half away from zero.
    ///
    /// The rounding is done on integer tenths so that averages such as
    /// `4.45` round the same way regardless of float representation.
    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = Rating>,
    {
        let (sum, count) = ratings
            .into_iter()
            .fold((0_u64, 0_u64), |(sum, count), rating| {
                (sum + u64::from(rating.value()), count + 1)
            });

        if count == 0 {
            return Self::EMPTY;
        }

        // Ratings are positive, so "half away from zero" is "half up".
        let tenths = (sum * 20 + count) / (count * 2);

        #[allow(clippy::cast_precision_loss)] // tenths is at most 50
        let average_rating = tenths as f64 / 10.0;

        Self {
            average_rating,
            num_reviews: count,
        }
    }
}

impl Default for RatingSummary {
    fn default() -> Self {
        Self::EMPTY
    }
}
