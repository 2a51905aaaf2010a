//! Review model shared by ingestion, analysis and reporting

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Star rating attached to a review.
///
/// Always within `Rating::MIN..=Rating::MAX`. Construction goes through
/// [`Rating::new`], `TryFrom<u8>`, `FromStr`, or serde, all of which reject
/// out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Lowest rating counted as praise
    pub const PRAISE_THRESHOLD: u8 = 4;

    /// Highest rating counted as a complaint
    pub const COMPLAINT_THRESHOLD: u8 = 2;

    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidInput(format!(
                "rating {} outside {}-{}",
                value,
                Self::MIN,
                Self::MAX
            )))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_praise(self) -> bool {
        self.0 >= Self::PRAISE_THRESHOLD
    }

    pub fn is_complaint(self) -> bool {
        self.0 <= Self::COMPLAINT_THRESHOLD
    }
}

impl TryFrom<u8> for Rating {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> u8 {
        rating.0
    }
}

impl FromStr for Rating {
    type Err = Error;

    /// Parses an integer rating, tolerating surrounding whitespace.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| Error::InvalidInput(format!("rating '{}' is not an integer", trimmed)))?;

        u8::try_from(value)
            .map_err(|_| {
                Error::InvalidInput(format!(
                    "rating {} outside {}-{}",
                    value,
                    Self::MIN,
                    Self::MAX
                ))
            })
            .and_then(Self::new)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single client review.
///
/// Reviews are immutable once built; the engine receives them already
/// validated and ordered by the ingestion layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    date: String,
    rating: Rating,
    review_text: String,
}

impl Review {
    pub fn new(date: impl Into<String>, rating: Rating, review_text: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            rating,
            review_text: review_text.into(),
        }
    }

    /// Calendar date as supplied by the source (not parsed)
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn review_text(&self) -> &str {
        &self.review_text
    }
}
