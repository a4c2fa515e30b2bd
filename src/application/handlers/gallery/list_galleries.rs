//! ListGalleriesHandler - Query handler for browsing galleries.

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::bus::{Query, QueryHandler};
use crate::domain::foundation::{ClientId, DomainError, ValidationError};
use crate::domain::gallery::{Gallery, GalleryStatus};
use crate::ports::{GalleryFilter, GalleryRepository};

/// Query to list galleries, newest first, optionally filtered.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListGalleriesQuery {
    pub filter: GalleryFilter,
}

impl ListGalleriesQuery {
    pub fn new(client_id: Option<i64>, status: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            filter: GalleryFilter {
                client_id: client_id.map(ClientId::new).transpose()?,
                status: status.map(GalleryStatus::from_string).transpose()?,
            },
        })
    }
}

impl Query for ListGalleriesQuery {
    type Output = Vec<Gallery>;
}

/// Handler for listing galleries.
pub struct ListGalleriesHandler {
    galleries: Arc<dyn GalleryRepository>,
}

impl ListGalleriesHandler {
    pub fn new(galleries: Arc<dyn GalleryRepository>) -> Self {
        Self { galleries }
    }
}

#[async_trait]
impl QueryHandler for ListGalleriesHandler {
    type Query = ListGalleriesQuery;

    async fn handle(&self, query: ListGalleriesQuery) -> Result<Vec<Gallery>, DomainError> {
        self.galleries.list(&query.filter).await
    }
}
