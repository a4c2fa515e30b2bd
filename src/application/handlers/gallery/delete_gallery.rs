//! DeleteGalleryHandler - Command handler for removing a gallery and its content.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::application::bus::{Command, CommandHandler};
use crate::application::handlers::lookup::require_gallery;
use crate::domain::foundation::{CommandMetadata, DomainError, GalleryId, ValidationError};
use crate::ports::GalleryRepository;

/// Command to delete a gallery with its images and their ratings.
#[derive(Debug, Clone, Copy)]
pub struct DeleteGalleryCommand {
    pub gallery_id: GalleryId,
}

impl DeleteGalleryCommand {
    pub fn new(gallery_id: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            gallery_id: GalleryId::new(gallery_id)?,
        })
    }
}

impl Command for DeleteGalleryCommand {
    type Output = ();
}

/// Handler for deleting galleries.
pub struct DeleteGalleryHandler {
    galleries: Arc<dyn GalleryRepository>,
}

impl DeleteGalleryHandler {
    pub fn new(galleries: Arc<dyn GalleryRepository>) -> Self {
        Self { galleries }
    }
}

#[async_trait]
impl CommandHandler for DeleteGalleryHandler {
    type Command = DeleteGalleryCommand;

    async fn handle(
        &self,
        cmd: DeleteGalleryCommand,
        metadata: CommandMetadata,
    ) -> Result<(), DomainError> {
        let gallery = require_gallery(self.galleries.as_ref(), cmd.gallery_id).await?;
        let removed = self.galleries.delete(gallery.id()).await?;

        info!(
            gallery_id = %gallery.id(),
            slug = %gallery.slug(),
            images = removed.images,
            ratings = removed.ratings,
            actor = %metadata.actor,
            "Gallery deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryGalleryRepository, InMemoryImageRepository, InMemoryRatingRepository,
    };
    use crate::domain::foundation::{ClientId, ErrorCode};
    use crate::domain::gallery::{GallerySlug, NewGallery};
    use crate::domain::image::NewImage;
    use crate::domain::rating::{NewRating, Stars};
    use crate::ports::{ImageRepository, RatingRepository};

    #[tokio::test]
    async fn deletes_gallery_images_and_ratings() {
        let ratings = InMemoryRatingRepository::new();
        let images = InMemoryImageRepository::with_ratings(ratings.clone());
        let galleries = InMemoryGalleryRepository::with_images(images.clone());
        let client = ClientId::new(1).unwrap();

        let mut gallery_ids = Vec::new();
        for name in ["Wedding", "Portraits"] {
            let new =
                NewGallery::new(client, name, GallerySlug::from_name(name).unwrap(), None).unwrap();
            let gallery = galleries.create(&new).await.unwrap();
            let image = images
                .create(
                    &NewImage::new(gallery.id(), "a.jpg", "https://cdn.example.com/a.jpg", None)
                        .unwrap(),
                )
                .await
                .unwrap();
            ratings
                .upsert(&NewRating::new(image.id(), client, Stars::new(5).unwrap(), None).unwrap())
                .await
                .unwrap();
            gallery_ids.push(gallery.id());
        }

        let handler = DeleteGalleryHandler::new(Arc::new(galleries.clone()));
        handler
            .handle(
                DeleteGalleryCommand::new(gallery_ids[0].value()).unwrap(),
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert_eq!(galleries.len().await, 1);
        assert_eq!(images.len().await, 1);
        assert_eq!(ratings.len().await, 1);
        assert!(galleries.find_by_id(gallery_ids[1]).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unknown_gallery_is_not_found() {
        let handler = DeleteGalleryHandler::new(Arc::new(InMemoryGalleryRepository::new()));

        let err = handler
            .handle(DeleteGalleryCommand::new(1).unwrap(), CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::GalleryNotFound);
    }
}
