//! ReorderImagesHandler - Command handler for arranging a gallery's images.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::info;

use crate::application::bus::{Command, CommandHandler};
use crate::application::handlers::lookup::require_gallery;
use crate::domain::foundation::{
    CommandMetadata, DomainError, GalleryId, ImageId, ValidationError,
};
use crate::domain::image::Image;
use crate::ports::{GalleryRepository, ImageRepository};

/// Command to set the order of every image in a gallery.
///
/// `image_ids[n]` gets sort order `n`.
#[derive(Debug, Clone)]
pub struct ReorderImagesCommand {
    pub gallery_id: GalleryId,
    pub image_ids: Vec<ImageId>,
}

impl ReorderImagesCommand {
    pub fn new(gallery_id: i64, image_ids: &[i64]) -> Result<Self, ValidationError> {
        let image_ids = image_ids
            .iter()
            .map(|&id| ImageId::new(id))
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = HashSet::with_capacity(image_ids.len());
        if let Some(duplicate) = image_ids.iter().find(|id| !seen.insert(**id)) {
            return Err(ValidationError::invalid_format(
                "image_ids",
                format!("image {} is listed more than once", duplicate),
            ));
        }

        Ok(Self {
            gallery_id: GalleryId::new(gallery_id)?,
            image_ids,
        })
    }
}

impl Command for ReorderImagesCommand {
    type Output = Vec<Image>;
}

/// Handler for reordering images.
pub struct ReorderImagesHandler {
    galleries: Arc<dyn GalleryRepository>,
    images: Arc<dyn ImageRepository>,
}

impl ReorderImagesHandler {
    pub fn new(galleries: Arc<dyn GalleryRepository>, images: Arc<dyn ImageRepository>) -> Self {
        Self { galleries, images }
    }
}

#[async_trait]
impl CommandHandler for ReorderImagesHandler {
    type Command = ReorderImagesCommand;

    async fn handle(
        &self,
        cmd: ReorderImagesCommand,
        metadata: CommandMetadata,
    ) -> Result<Vec<Image>, DomainError> {
        let gallery = require_gallery(self.galleries.as_ref(), cmd.gallery_id).await?;
        gallery.ensure_editable()?;

        let mut current: HashMap<ImageId, Image> = self
            .images
            .list_by_gallery(gallery.id())
            .await?
            .into_iter()
            .map(|image| (image.id(), image))
            .collect();

        if current.len() != cmd.image_ids.len()
            || cmd.image_ids.iter().any(|id| !current.contains_key(id))
        {
            return Err(DomainError::validation(
                "image_ids",
                format!(
                    "must list exactly the {} images of gallery {}",
                    current.len(),
                    gallery.id()
                ),
            ));
        }

        let mut ordered = Vec::with_capacity(cmd.image_ids.len());
        for (position, id) in cmd.image_ids.iter().enumerate() {
            if let Some(mut image) = current.remove(id) {
                image.set_sort_order(position as u32);
                ordered.push(image);
            }
        }
        self.images.update_sort_orders(&ordered).await?;

        info!(
            gallery_id = %gallery.id(),
            images = ordered.len(),
            actor = %metadata.actor,
            "Images reordered"
        );
        Ok(ordered)
    }
}
