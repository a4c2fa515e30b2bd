//! Rating domain module.
//!
//! A client rates images of a gallery delivered to them with one to five
//! stars. Each client holds at most one rating per image; rating again
//! replaces the earlier one.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{
    optional_text, ClientId, ImageId, RatingId, Timestamp, ValidationError,
};

pub const MIN_STARS: u8 = 1;
pub const MAX_STARS: u8 = 5;
pub const MAX_COMMENT_LENGTH: usize = 2000;

/// Star rating from 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Stars(u8);

impl Stars {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value < MIN_STARS as i64 || value > MAX_STARS as i64 {
            return Err(ValidationError::out_of_range(
                "stars",
                MIN_STARS as i64,
                MAX_STARS as i64,
                value,
            ));
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Stars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, MAX_STARS)
    }
}

impl TryFrom<u8> for Stars {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value as i64)
    }
}

impl From<Stars> for u8 {
    fn from(stars: Stars) -> u8 {
        stars.0
    }
}

/// A rating that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRating {
    pub image_id: ImageId,
    pub client_id: ClientId,
    pub stars: Stars,
    pub comment: Option<String>,
}

impl NewRating {
    pub fn new(
        image_id: ImageId,
        client_id: ClientId,
        stars: Stars,
        comment: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            image_id,
            client_id,
            stars,
            comment: optional_text("comment", comment, MAX_COMMENT_LENGTH)?,
        })
    }
}

/// Rating entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    id: RatingId,
    image_id: ImageId,
    client_id: ClientId,
    stars: Stars,
    comment: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Rating {
    /// Reconstitute a rating from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: RatingId,
        image_id: ImageId,
        client_id: ClientId,
        stars: Stars,
        comment: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            image_id,
            client_id,
            stars,
            comment,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> RatingId {
        self.id
    }

    pub fn image_id(&self) -> ImageId {
        self.image_id
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    pub fn stars(&self) -> Stars {
        self.stars
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Overwrite stars and comment with a newer rating by the same client.
    pub fn replace_with(&mut self, new: NewRating, now: Timestamp) {
        self.stars = new.stars;
        self.comment = new.comment;
        self.updated_at = now;
    }
}

/// Aggregate view of all ratings for one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub image_id: ImageId,
    pub count: u32,
    /// `None` when the image has no ratings.
    pub average: Option<f64>,
}

impl RatingSummary {
    pub fn from_ratings(image_id: ImageId, ratings: &[Rating]) -> Self {
        let count = ratings.len() as u32;
        let average = if ratings.is_empty() {
            None
        } else {
            let total: u32 = ratings.iter().map(|r| r.stars().value() as u32).sum();
            Some(total as f64 / count as f64)
        };
        Self {
            image_id,
            count,
            average,
        }
    }
}
