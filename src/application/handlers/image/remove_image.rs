//! RemoveImageHandler - Command handler for removing one image.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::application::bus::{Command, CommandHandler};
use crate::application::handlers::lookup::{require_gallery, require_image};
use crate::domain::foundation::{CommandMetadata, DomainError, ImageId, ValidationError};
use crate::ports::{GalleryRepository, ImageRepository};

/// Command to remove an image and its ratings.
#[derive(Debug, Clone, Copy)]
pub struct RemoveImageCommand {
    pub image_id: ImageId,
}

impl RemoveImageCommand {
    pub fn new(image_id: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            image_id: ImageId::new(image_id)?,
        })
    }
}

impl Command for RemoveImageCommand {
    type Output = ();
}

/// Handler for removing images.
pub struct RemoveImageHandler {
    galleries: Arc<dyn GalleryRepository>,
    images: Arc<dyn ImageRepository>,
}

impl RemoveImageHandler {
    pub fn new(galleries: Arc<dyn GalleryRepository>, images: Arc<dyn ImageRepository>) -> Self {
        Self { galleries, images }
    }
}

#[async_trait]
impl CommandHandler for RemoveImageHandler {
    type Command = RemoveImageCommand;

    async fn handle(
        &self,
        cmd: RemoveImageCommand,
        metadata: CommandMetadata,
    ) -> Result<(), DomainError> {
        let image = require_image(self.images.as_ref(), cmd.image_id).await?;
        let gallery = require_gallery(self.galleries.as_ref(), image.gallery_id()).await?;
        gallery.ensure_editable()?;

        let ratings = self.images.delete(image.id()).await?;

        info!(
            image_id = %image.id(),
            gallery_id = %gallery.id(),
            ratings,
            actor = %metadata.actor,
            "Image removed"
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
    use crate::domain::gallery::{GallerySlug, GalleryStatus, NewGallery};
    use crate::domain::image::NewImage;
    use crate::domain::rating::{NewRating, Stars};
    use crate::ports::RatingRepository;

    struct Fixture {
        handler: RemoveImageHandler,
        galleries: Arc<InMemoryGalleryRepository>,
        images: Arc<InMemoryImageRepository>,
        ratings: InMemoryRatingRepository,
    }

    async fn setup() -> Fixture {
        let galleries = Arc::new(InMemoryGalleryRepository::new());
        let ratings = InMemoryRatingRepository::new();
        let images = Arc::new(InMemoryImageRepository::with_ratings(ratings.clone()));
        let client = ClientId::new(1).unwrap();

        let gallery = galleries
            .create(
                &NewGallery::new(client, "Wedding", GallerySlug::from_name("Wedding").unwrap(), None)
                    .unwrap(),
            )
            .await
            .unwrap();
        for file in ["a.jpg", "b.jpg"] {
            let image = images
                .create(
                    &NewImage::new(gallery.id(), file, "https://cdn.example.com/x.jpg", None)
                        .unwrap(),
                )
                .await
                .unwrap();
            ratings
                .upsert(&NewRating::new(image.id(), client, Stars::new(4).unwrap(), None).unwrap())
                .await
                .unwrap();
        }

        Fixture {
            handler: RemoveImageHandler::new(galleries.clone(), images.clone()),
            galleries,
            images,
            ratings,
        }
    }

    #[tokio::test]
    async fn removes_image_and_its_ratings() {
        let fx = setup().await;

        fx.handler
            .handle(RemoveImageCommand::new(1).unwrap(), CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert_eq!(fx.images.len().await, 1);
        assert_eq!(fx.ratings.len().await, 1);
        assert!(fx.images.find_by_id(ImageId::new(1).unwrap()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn archived_gallery_keeps_its_images() {
        let fx = setup().await;
        let mut gallery = fx.galleries.list(&Default::default()).await.unwrap().remove(0);
        gallery.change_status(GalleryStatus::Archived);
        fx.galleries.update(&gallery).await.unwrap();

        let err = fx
            .handler
            .handle(RemoveImageCommand::new(1).unwrap(), CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::GalleryArchived);
        assert_eq!(fx.images.len().await, 2);
    }

    #[tokio::test]
    async fn unknown_image_is_not_found() {
        let fx = setup().await;

        let err = fx
            .handler
            .handle(RemoveImageCommand::new(50).unwrap(), CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ImageNotFound);
    }
}
