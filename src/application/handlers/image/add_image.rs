//! AddImageHandler - Command handler for appending an image to a gallery.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::application::bus::{Command, CommandHandler};
use crate::application::handlers::lookup::require_gallery;
use crate::domain::foundation::{CommandMetadata, DomainError, GalleryId, ValidationError};
use crate::domain::image::{Image, NewImage};
use crate::ports::{GalleryRepository, ImageRepository};

/// Command to add an image at the end of a gallery.
#[derive(Debug, Clone)]
pub struct AddImageCommand {
    pub image: NewImage,
}

impl AddImageCommand {
    pub fn new(
        gallery_id: i64,
        file_name: &str,
        url: &str,
        title: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            image: NewImage::new(GalleryId::new(gallery_id)?, file_name, url, title)?,
        })
    }
}

impl Command for AddImageCommand {
    type Output = Image;
}

/// Handler for adding images.
pub struct AddImageHandler {
    galleries: Arc<dyn GalleryRepository>,
    images: Arc<dyn ImageRepository>,
}

impl AddImageHandler {
    pub fn new(galleries: Arc<dyn GalleryRepository>, images: Arc<dyn ImageRepository>) -> Self {
        Self { galleries, images }
    }
}

#[async_trait]
impl CommandHandler for AddImageHandler {
    type Command = AddImageCommand;

    async fn handle(
        &self,
        cmd: AddImageCommand,
        metadata: CommandMetadata,
    ) -> Result<Image, DomainError> {
        let gallery = require_gallery(self.galleries.as_ref(), cmd.image.gallery_id).await?;
        gallery.ensure_editable()?;

        let image = self.images.create(&cmd.image).await?;

        info!(
            image_id = %image.id(),
            gallery_id = %gallery.id(),
            sort_order = image.sort_order(),
            actor = %metadata.actor,
            "Image added"
        );
        Ok(image)
    }
}
