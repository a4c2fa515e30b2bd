//! ChangeGalleryStatusHandler - Command handler for publishing and archiving.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::application::bus::{Command, CommandHandler};
use crate::application::handlers::lookup::require_gallery;
use crate::domain::foundation::{CommandMetadata, DomainError, GalleryId, ValidationError};
use crate::domain::gallery::{Gallery, GalleryStatus};
use crate::ports::GalleryRepository;

/// Command to move a gallery to another status.
#[derive(Debug, Clone, Copy)]
pub struct ChangeGalleryStatusCommand {
    pub gallery_id: GalleryId,
    pub status: GalleryStatus,
}

impl ChangeGalleryStatusCommand {
    pub fn new(gallery_id: i64, status: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            gallery_id: GalleryId::new(gallery_id)?,
            status: GalleryStatus::from_string(status)?,
        })
    }
}

impl Command for ChangeGalleryStatusCommand {
    type Output = Gallery;
}

/// Handler for gallery status changes.
pub struct ChangeGalleryStatusHandler {
    galleries: Arc<dyn GalleryRepository>,
}

impl ChangeGalleryStatusHandler {
    pub fn new(galleries: Arc<dyn GalleryRepository>) -> Self {
        Self { galleries }
    }
}

#[async_trait]
impl CommandHandler for ChangeGalleryStatusHandler {
    type Command = ChangeGalleryStatusCommand;

    async fn handle(
        &self,
        cmd: ChangeGalleryStatusCommand,
        metadata: CommandMetadata,
    ) -> Result<Gallery, DomainError> {
        let mut gallery = require_gallery(self.galleries.as_ref(), cmd.gallery_id).await?;
        let previous = gallery.status();

        if gallery.change_status(cmd.status) {
            self.galleries.update(&gallery).await?;
            info!(
                gallery_id = %gallery.id(),
                from = %previous,
                to = %cmd.status,
                actor = %metadata.actor,
                "Gallery status changed"
            );
        }

        Ok(gallery)
    }
}
