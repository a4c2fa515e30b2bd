//! UpdateGalleryHandler - Command handler for editing gallery details.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use super::slugs::allocate_slug;
use crate::application::bus::{Command, CommandHandler};
use crate::application::handlers::lookup::require_gallery;
use crate::domain::foundation::{
    optional_text, required_text, CommandMetadata, DomainError, GalleryId, ValidationError,
};
use crate::domain::gallery::{Gallery, GallerySlug, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH};
use crate::ports::GalleryRepository;

/// Command to replace a gallery's name, slug and description.
#[derive(Debug, Clone)]
pub struct UpdateGalleryCommand {
    pub gallery_id: GalleryId,
    pub name: String,
    /// `None` keeps the current slug.
    pub slug: Option<GallerySlug>,
    /// `None` clears the description.
    pub description: Option<String>,
}

impl UpdateGalleryCommand {
    pub fn new(
        gallery_id: i64,
        name: &str,
        slug: Option<&str>,
        description: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            gallery_id: GalleryId::new(gallery_id)?,
            name: required_text("name", name, MAX_NAME_LENGTH)?,
            slug: slug
                .filter(|s| !s.trim().is_empty())
                .map(GallerySlug::from_string)
                .transpose()?,
            description: optional_text("description", description, MAX_DESCRIPTION_LENGTH)?,
        })
    }
}

impl Command for UpdateGalleryCommand {
    type Output = Gallery;
}

/// Handler for updating galleries.
pub struct UpdateGalleryHandler {
    galleries: Arc<dyn GalleryRepository>,
}

impl UpdateGalleryHandler {
    pub fn new(galleries: Arc<dyn GalleryRepository>) -> Self {
        Self { galleries }
    }
}

#[async_trait]
impl CommandHandler for UpdateGalleryHandler {
    type Command = UpdateGalleryCommand;

    async fn handle(
        &self,
        cmd: UpdateGalleryCommand,
        metadata: CommandMetadata,
    ) -> Result<Gallery, DomainError> {
        let mut gallery = require_gallery(self.galleries.as_ref(), cmd.gallery_id).await?;
        gallery.ensure_editable()?;

        gallery.rename(&cmd.name)?;
        if let Some(requested) = cmd.slug.filter(|slug| slug != gallery.slug()) {
            let own = gallery.slug().clone();
            let slug = allocate_slug(self.galleries.as_ref(), &requested, Some(&own)).await?;
            gallery.change_slug(slug)?;
        }
        gallery.update_description(cmd.description.as_deref())?;

        self.galleries.update(&gallery).await?;

        info!(
            gallery_id = %gallery.id(),
            slug = %gallery.slug(),
            actor = %metadata.actor,
            "Gallery updated"
        );
        Ok(gallery)
    }
}
