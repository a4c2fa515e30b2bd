//! Query handlers for looking up a single gallery by id or by slug.

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::bus::{Query, QueryHandler};
use crate::application::handlers::lookup::require_gallery;
use crate::domain::foundation::{DomainError, ErrorCode, GalleryId, ValidationError};
use crate::domain::gallery::{Gallery, GallerySlug};
use crate::ports::GalleryRepository;

/// Query to get a gallery by ID.
#[derive(Debug, Clone, Copy)]
pub struct GetGalleryQuery {
    pub gallery_id: GalleryId,
}

impl GetGalleryQuery {
    pub fn new(gallery_id: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            gallery_id: GalleryId::new(gallery_id)?,
        })
    }
}

impl Query for GetGalleryQuery {
    type Output = Gallery;
}

/// Query to get a gallery by its public slug.
#[derive(Debug, Clone)]
pub struct GetGalleryBySlugQuery {
    pub slug: GallerySlug,
}

impl GetGalleryBySlugQuery {
    /// Normalizes `slug` first, so `"Summer Wedding"` finds `summer-wedding`.
    pub fn new(slug: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            slug: GallerySlug::from_string(slug)?,
        })
    }
}

impl Query for GetGalleryBySlugQuery {
    type Output = Gallery;
}

/// Handler for retrieving galleries by ID.
pub struct GetGalleryHandler {
    galleries: Arc<dyn GalleryRepository>,
}

impl GetGalleryHandler {
    pub fn new(galleries: Arc<dyn GalleryRepository>) -> Self {
        Self { galleries }
    }
}

#[async_trait]
impl QueryHandler for GetGalleryHandler {
    type Query = GetGalleryQuery;

    async fn handle(&self, query: GetGalleryQuery) -> Result<Gallery, DomainError> {
        require_gallery(self.galleries.as_ref(), query.gallery_id).await
    }
}

/// Handler for retrieving galleries by slug.
pub struct GetGalleryBySlugHandler {
    galleries: Arc<dyn GalleryRepository>,
}

impl GetGalleryBySlugHandler {
    pub fn new(galleries: Arc<dyn GalleryRepository>) -> Self {
        Self { galleries }
    }
}

#[async_trait]
impl QueryHandler for GetGalleryBySlugHandler {
    type Query = GetGalleryBySlugQuery;

    async fn handle(&self, query: GetGalleryBySlugQuery) -> Result<Gallery, DomainError> {
        self.galleries
            .find_by_slug(&query.slug)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::GalleryNotFound,
                    format!("Gallery not found: {}", query.slug),
                )
                .with_detail("slug", query.slug.value())
            })
    }
}
