//! In-memory implementation of ImageRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::AtomicI64;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{next_id, InMemoryRatingRepository};
use crate::domain::foundation::{DomainError, ErrorCode, GalleryId, ImageId, Timestamp};
use crate::domain::image::{Image, NewImage};
use crate::ports::{ImageRepository, RemovedContent};

/// In-memory image store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryImageRepository {
    images: Arc<RwLock<HashMap<ImageId, Image>>>,
    ids: Arc<AtomicI64>,
    /// Rating store cleared along with deleted images.
    ratings: Option<InMemoryRatingRepository>,
}

impl InMemoryImageRepository {
    /// A standalone store; deleting an image touches no ratings.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose deletes also remove the images' ratings from `ratings`.
    pub fn with_ratings(ratings: InMemoryRatingRepository) -> Self {
        Self {
            ratings: Some(ratings),
            ..Self::default()
        }
    }

    pub async fn len(&self) -> usize {
        self.images.read().await.len()
    }

    /// Drops every image of a gallery and their ratings. Called by the
    /// gallery store while it holds its own write lock.
    pub(super) async fn remove_gallery_content(&self, gallery_id: GalleryId) -> RemovedContent {
        let mut images = self.images.write().await;
        let doomed: Vec<ImageId> = images
            .values()
            .filter(|i| i.gallery_id() == gallery_id)
            .map(|i| i.id())
            .collect();
        images.retain(|id, _| !doomed.contains(id));

        RemovedContent {
            images: doomed.len() as u64,
            ratings: self.remove_ratings(&doomed).await,
        }
    }

    async fn remove_ratings(&self, image_ids: &[ImageId]) -> u64 {
        match &self.ratings {
            Some(ratings) => ratings.remove_for_images(image_ids).await,
            None => 0,
        }
    }
}

fn not_found(id: ImageId) -> DomainError {
    DomainError::new(ErrorCode::ImageNotFound, format!("Image not found: {}", id))
}

#[async_trait]
impl ImageRepository for InMemoryImageRepository {
    async fn create(&self, image: &NewImage) -> Result<Image, DomainError> {
        let mut images = self.images.write().await;
        let position = images
            .values()
            .filter(|i| i.gallery_id() == image.gallery_id)
            .map(|i| i.sort_order() + 1)
            .max()
            .unwrap_or(0);

        let id = ImageId::new(next_id(&self.ids))?;
        let created = Image::from_new(id, image.clone(), position, Timestamp::now());
        images.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: ImageId) -> Result<Option<Image>, DomainError> {
        Ok(self.images.read().await.get(&id).cloned())
    }

    async fn list_by_gallery(&self, gallery_id: GalleryId) -> Result<Vec<Image>, DomainError> {
        let mut images: Vec<Image> = self
            .images
            .read()
            .await
            .values()
            .filter(|i| i.gallery_id() == gallery_id)
            .cloned()
            .collect();
        images.sort_by_key(|i| (i.sort_order(), i.id()));
        Ok(images)
    }

    async fn update_sort_orders(&self, images: &[Image]) -> Result<(), DomainError> {
        let mut stored = self.images.write().await;
        if let Some(missing) = images.iter().find(|i| !stored.contains_key(&i.id())) {
            return Err(not_found(missing.id()));
        }
        for image in images {
            if let Some(existing) = stored.get_mut(&image.id()) {
                existing.set_sort_order(image.sort_order());
            }
        }
        Ok(())
    }

    async fn delete(&self, id: ImageId) -> Result<u64, DomainError> {
        let mut images = self.images.write().await;
        if images.remove(&id).is_none() {
            return Err(not_found(id));
        }
        Ok(self.remove_ratings(&[id]).await)
    }
}
