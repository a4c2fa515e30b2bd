//! Rating repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ImageId};
use crate::domain::rating::{NewRating, Rating};

/// Repository port for Rating persistence.
///
/// Ratings are removed through their image or gallery; see
/// `ImageRepository::delete` and `GalleryRepository::delete`.
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Insert the rating, or replace the existing one by the same client
    /// for the same image.
    async fn upsert(&self, rating: &NewRating) -> Result<Rating, DomainError>;

    /// Ratings of one image, oldest first.
    async fn list_by_image(&self, image_id: ImageId) -> Result<Vec<Rating>, DomainError>;
}
