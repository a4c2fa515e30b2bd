//! Gallery repository port.
//!
//! Defines the contract for persisting and retrieving Gallery aggregates.
//!
//! # Design
//!
//! - **Store-assigned ids**: `create` returns the gallery with its new id
//! - **Unique slugs**: implementations must reject a duplicate slug with
//!   `SlugTaken`, even if the caller already ran `GallerySlug::make_unique`
//! - **Owned content**: deleting a gallery removes its images and their
//!   ratings in the same unit of work

use async_trait::async_trait;

use crate::domain::foundation::{ClientId, DomainError, GalleryId};
use crate::domain::gallery::{Gallery, GallerySlug, GalleryStatus, NewGallery};

/// Filter for listing galleries. Empty fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GalleryFilter {
    pub client_id: Option<ClientId>,
    pub status: Option<GalleryStatus>,
}

impl GalleryFilter {
    pub fn matches(&self, gallery: &Gallery) -> bool {
        self.client_id.map_or(true, |id| gallery.client_id() == id)
            && self.status.map_or(true, |status| gallery.status() == status)
    }
}

/// Rows removed together with a gallery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemovedContent {
    pub images: u64,
    pub ratings: u64,
}

/// Repository port for Gallery aggregate persistence.
#[async_trait]
pub trait GalleryRepository: Send + Sync {
    /// Insert a new gallery and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// - `SlugTaken` if another gallery already uses the slug
    /// - `DatabaseError` on persistence failure
    async fn create(&self, gallery: &NewGallery) -> Result<Gallery, DomainError>;

    /// Update an existing gallery.
    ///
    /// # Errors
    ///
    /// - `GalleryNotFound` if the gallery doesn't exist
    /// - `SlugTaken` if the new slug belongs to another gallery
    async fn update(&self, gallery: &Gallery) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: GalleryId) -> Result<Option<Gallery>, DomainError>;

    async fn find_by_slug(&self, slug: &GallerySlug) -> Result<Option<Gallery>, DomainError>;

    /// Every stored slug that starts with `prefix`.
    ///
    /// Called with `GallerySlug::collision_prefix` to feed the existence
    /// predicate of `GallerySlug::make_unique`.
    async fn slugs_starting_with(&self, prefix: &str) -> Result<Vec<String>, DomainError>;

    /// List galleries matching the filter, newest first.
    async fn list(&self, filter: &GalleryFilter) -> Result<Vec<Gallery>, DomainError>;

    async fn count_by_client(&self, client_id: ClientId) -> Result<u32, DomainError>;

    /// Delete a gallery with its images and their ratings, all or nothing.
    ///
    /// # Errors
    ///
    /// - `GalleryNotFound` if the gallery doesn't exist; nothing is removed
    async fn delete(&self, id: GalleryId) -> Result<RemovedContent, DomainError>;
}
