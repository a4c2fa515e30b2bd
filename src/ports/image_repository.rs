//! Image repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, GalleryId, ImageId};
use crate::domain::image::{Image, NewImage};

/// Repository port for Image persistence.
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Insert an image after the gallery's current last position.
    async fn create(&self, image: &NewImage) -> Result<Image, DomainError>;

    async fn find_by_id(&self, id: ImageId) -> Result<Option<Image>, DomainError>;

    /// Images of a gallery ordered by position.
    async fn list_by_gallery(&self, gallery_id: GalleryId) -> Result<Vec<Image>, DomainError>;

    /// Persist the positions of the given images.
    async fn update_sort_orders(&self, images: &[Image]) -> Result<(), DomainError>;

    /// Delete an image with its ratings, all or nothing. Returns how many
    /// ratings were removed.
    ///
    /// # Errors
    ///
    /// - `ImageNotFound` if the image doesn't exist; nothing is removed
    async fn delete(&self, id: ImageId) -> Result<u64, DomainError>;
}
