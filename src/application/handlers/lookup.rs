//! Load-or-fail helpers shared by handlers.

use crate::domain::client::Client;
use crate::domain::foundation::{ClientId, DomainError, ErrorCode, GalleryId, ImageId};
use crate::domain::gallery::Gallery;
use crate::domain::image::Image;
use crate::ports::{ClientRepository, GalleryRepository, ImageRepository};

pub(crate) async fn require_client(
    clients: &dyn ClientRepository,
    id: ClientId,
) -> Result<Client, DomainError> {
    clients.find_by_id(id).await?.ok_or_else(|| {
        DomainError::new(ErrorCode::ClientNotFound, format!("Client not found: {}", id))
            .with_detail("client_id", id.to_string())
    })
}

pub(crate) async fn require_gallery(
    galleries: &dyn GalleryRepository,
    id: GalleryId,
) -> Result<Gallery, DomainError> {
    galleries.find_by_id(id).await?.ok_or_else(|| {
        DomainError::new(ErrorCode::GalleryNotFound, format!("Gallery not found: {}", id))
            .with_detail("gallery_id", id.to_string())
    })
}

pub(crate) async fn require_image(
    images: &dyn ImageRepository,
    id: ImageId,
) -> Result<Image, DomainError> {
    images.find_by_id(id).await?.ok_or_else(|| {
        DomainError::new(ErrorCode::ImageNotFound, format!("Image not found: {}", id))
            .with_detail("image_id", id.to_string())
    })
}
