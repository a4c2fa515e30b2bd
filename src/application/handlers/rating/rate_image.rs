//! RateImageHandler - Command handler for a client rating a delivered image.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::application::bus::{Command, CommandHandler};
use crate::application::handlers::lookup::{require_client, require_gallery, require_image};
use crate::domain::foundation::{
    ClientId, CommandMetadata, DomainError, ErrorCode, ImageId, ValidationError,
};
use crate::domain::rating::{NewRating, Rating, Stars};
use crate::ports::{ClientRepository, GalleryRepository, ImageRepository, RatingRepository};

/// Command to rate an image. Rating the same image again replaces the
/// earlier rating.
#[derive(Debug, Clone)]
pub struct RateImageCommand {
    pub rating: NewRating,
}

impl RateImageCommand {
    pub fn new(
        image_id: i64,
        client_id: i64,
        stars: i64,
        comment: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            rating: NewRating::new(
                ImageId::new(image_id)?,
                ClientId::new(client_id)?,
                Stars::new(stars)?,
                comment,
            )?,
        })
    }
}

impl Command for RateImageCommand {
    type Output = Rating;
}

/// Handler for rating images.
pub struct RateImageHandler {
    clients: Arc<dyn ClientRepository>,
    galleries: Arc<dyn GalleryRepository>,
    images: Arc<dyn ImageRepository>,
    ratings: Arc<dyn RatingRepository>,
}

impl RateImageHandler {
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        galleries: Arc<dyn GalleryRepository>,
        images: Arc<dyn ImageRepository>,
        ratings: Arc<dyn RatingRepository>,
    ) -> Self {
        Self {
            clients,
            galleries,
            images,
            ratings,
        }
    }
}

#[async_trait]
impl CommandHandler for RateImageHandler {
    type Command = RateImageCommand;

    async fn handle(
        &self,
        cmd: RateImageCommand,
        metadata: CommandMetadata,
    ) -> Result<Rating, DomainError> {
        let image = require_image(self.images.as_ref(), cmd.rating.image_id).await?;
        let gallery = require_gallery(self.galleries.as_ref(), image.gallery_id()).await?;
        let client = require_client(self.clients.as_ref(), cmd.rating.client_id).await?;

        if !gallery.status().is_published() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Gallery {} is {} and cannot be rated",
                    gallery.id(),
                    gallery.status()
                ),
            )
            .with_detail("status", gallery.status().value()));
        }
        if !gallery.is_owned_by(client.id()) {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                format!("Client {} cannot rate gallery {}", client.id(), gallery.id()),
            ));
        }

        let rating = self.ratings.upsert(&cmd.rating).await?;

        info!(
            rating_id = %rating.id(),
            image_id = %image.id(),
            client_id = %client.id(),
            stars = rating.stars().value(),
            actor = %metadata.actor,
            "Image rated"
        );
        Ok(rating)
    }
}
