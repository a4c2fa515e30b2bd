//! GetImageRatingsHandler - Query handler for an image's ratings.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use crate::application::bus::{Query, QueryHandler};
use crate::application::handlers::lookup::require_image;
use crate::domain::foundation::{DomainError, ImageId, ValidationError};
use crate::domain::rating::{Rating, RatingSummary};
use crate::ports::{ImageRepository, RatingRepository};

/// Query to get all ratings of one image with their summary.
#[derive(Debug, Clone, Copy)]
pub struct GetImageRatingsQuery {
    pub image_id: ImageId,
}

impl GetImageRatingsQuery {
    pub fn new(image_id: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            image_id: ImageId::new(image_id)?,
        })
    }
}

/// Ratings of one image, oldest first, plus count and average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRatings {
    pub summary: RatingSummary,
    pub ratings: Vec<Rating>,
}

impl Query for GetImageRatingsQuery {
    type Output = ImageRatings;
}

/// Handler for reading image ratings.
pub struct GetImageRatingsHandler {
    images: Arc<dyn ImageRepository>,
    ratings: Arc<dyn RatingRepository>,
}

impl GetImageRatingsHandler {
    pub fn new(images: Arc<dyn ImageRepository>, ratings: Arc<dyn RatingRepository>) -> Self {
        Self { images, ratings }
    }
}

#[async_trait]
impl QueryHandler for GetImageRatingsHandler {
    type Query = GetImageRatingsQuery;

    async fn handle(&self, query: GetImageRatingsQuery) -> Result<ImageRatings, DomainError> {
        let image = require_image(self.images.as_ref(), query.image_id).await?;
        let ratings = self.ratings.list_by_image(image.id()).await?;

        Ok(ImageRatings {
            summary: RatingSummary::from_ratings(image.id(), &ratings),
            ratings,
        })
    }
}
