//! ListGalleryImagesHandler - Query handler for a gallery's images.

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::bus::{Query, QueryHandler};
use crate::application::handlers::lookup::require_gallery;
use crate::domain::foundation::{DomainError, GalleryId, ValidationError};
use crate::domain::image::Image;
use crate::ports::{GalleryRepository, ImageRepository};

/// Query to list a gallery's images in display order.
#[derive(Debug, Clone, Copy)]
pub struct ListGalleryImagesQuery {
    pub gallery_id: GalleryId,
}

impl ListGalleryImagesQuery {
    pub fn new(gallery_id: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            gallery_id: GalleryId::new(gallery_id)?,
        })
    }
}

impl Query for ListGalleryImagesQuery {
    type Output = Vec<Image>;
}

/// Handler for listing gallery images.
pub struct ListGalleryImagesHandler {
    galleries: Arc<dyn GalleryRepository>,
    images: Arc<dyn ImageRepository>,
}

impl ListGalleryImagesHandler {
    pub fn new(galleries: Arc<dyn GalleryRepository>, images: Arc<dyn ImageRepository>) -> Self {
        Self { galleries, images }
    }
}

#[async_trait]
impl QueryHandler for ListGalleryImagesHandler {
    type Query = ListGalleryImagesQuery;

    async fn handle(&self, query: ListGalleryImagesQuery) -> Result<Vec<Image>, DomainError> {
        let gallery = require_gallery(self.galleries.as_ref(), query.gallery_id).await?;
        self.images.list_by_gallery(gallery.id()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryGalleryRepository, InMemoryImageRepository};
    use crate::domain::foundation::{ClientId, ErrorCode};
    use crate::domain::gallery::{GallerySlug, NewGallery};

    #[tokio::test]
    async fn empty_gallery_has_no_images() {
        let galleries = Arc::new(InMemoryGalleryRepository::new());
        galleries
            .create(
                &NewGallery::new(
                    ClientId::new(1).unwrap(),
                    "Wedding",
                    GallerySlug::from_name("Wedding").unwrap(),
                    None,
                )
                .unwrap(),
            )
            .await
            .unwrap();
        let handler =
            ListGalleryImagesHandler::new(galleries, Arc::new(InMemoryImageRepository::new()));

        let images = handler.handle(ListGalleryImagesQuery::new(1).unwrap()).await.unwrap();

        assert!(images.is_empty());
    }

    #[tokio::test]
    async fn unknown_gallery_is_not_found() {
        let handler = ListGalleryImagesHandler::new(
            Arc::new(InMemoryGalleryRepository::new()),
            Arc::new(InMemoryImageRepository::new()),
        );

        let err = handler
            .handle(ListGalleryImagesQuery::new(1).unwrap())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::GalleryNotFound);
    }
}
