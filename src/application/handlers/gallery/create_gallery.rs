//! CreateGalleryHandler - Command handler for creating galleries.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use super::slugs::allocate_slug;
use crate::application::bus::{Command, CommandHandler};
use crate::application::handlers::lookup::require_client;
use crate::domain::foundation::{
    optional_text, required_text, ClientId, CommandMetadata, DomainError, ValidationError,
};
use crate::domain::gallery::{
    Gallery, GallerySlug, NewGallery, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH,
};
use crate::ports::{ClientRepository, GalleryRepository};

/// Command to create a draft gallery for a client.
#[derive(Debug, Clone)]
pub struct CreateGalleryCommand {
    pub name: String,
    /// Requested slug, or the one derived from `name`. Made unique on save.
    pub slug: GallerySlug,
    pub client_id: ClientId,
    pub description: Option<String>,
}

impl CreateGalleryCommand {
    /// A blank `slug` counts as absent.
    pub fn new(
        name: &str,
        slug: Option<&str>,
        client_id: i64,
        description: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let name = required_text("name", name, MAX_NAME_LENGTH)?;
        let slug = match slug.filter(|s| !s.trim().is_empty()) {
            Some(raw) => GallerySlug::from_string(raw)?,
            None => GallerySlug::from_name(&name)?,
        };
        Ok(Self {
            name,
            slug,
            client_id: ClientId::new(client_id)?,
            description: optional_text("description", description, MAX_DESCRIPTION_LENGTH)?,
        })
    }
}

impl Command for CreateGalleryCommand {
    type Output = Gallery;
}

/// Handler for creating galleries.
pub struct CreateGalleryHandler {
    clients: Arc<dyn ClientRepository>,
    galleries: Arc<dyn GalleryRepository>,
}

impl CreateGalleryHandler {
    pub fn new(clients: Arc<dyn ClientRepository>, galleries: Arc<dyn GalleryRepository>) -> Self {
        Self { clients, galleries }
    }
}

#[async_trait]
impl CommandHandler for CreateGalleryHandler {
    type Command = CreateGalleryCommand;

    async fn handle(
        &self,
        cmd: CreateGalleryCommand,
        metadata: CommandMetadata,
    ) -> Result<Gallery, DomainError> {
        let client = require_client(self.clients.as_ref(), cmd.client_id).await?;

        let slug = allocate_slug(self.galleries.as_ref(), &cmd.slug, None).await?;
        let new = NewGallery::new(client.id(), &cmd.name, slug, cmd.description.as_deref())?;
        let gallery = self.galleries.create(&new).await?;

        info!(
            gallery_id = %gallery.id(),
            client_id = %client.id(),
            slug = %gallery.slug(),
            actor = %metadata.actor,
            "Gallery created"
        );
        Ok(gallery)
    }
}
