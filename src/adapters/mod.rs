//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to storage:
//! - `memory` - Process-local stores for tests and development
//! - `postgres` - PostgreSQL via sqlx

pub mod memory;
pub mod postgres;

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::{AppConfig, StorageBackend};
use crate::domain::foundation::DomainError;
use crate::ports::{ClientRepository, GalleryRepository, ImageRepository, RatingRepository};

/// The four repository ports, shared by every handler.
#[derive(Clone)]
pub struct Repositories {
    pub clients: Arc<dyn ClientRepository>,
    pub galleries: Arc<dyn GalleryRepository>,
    pub images: Arc<dyn ImageRepository>,
    pub ratings: Arc<dyn RatingRepository>,
}

impl Repositories {
    /// Fresh, empty in-memory stores, linked so deletes cascade.
    pub fn in_memory() -> Self {
        let ratings = memory::InMemoryRatingRepository::new();
        let images = memory::InMemoryImageRepository::with_ratings(ratings.clone());
        let galleries = memory::InMemoryGalleryRepository::with_images(images.clone());

        Self {
            clients: Arc::new(memory::InMemoryClientRepository::new()),
            galleries: Arc::new(galleries),
            images: Arc::new(images),
            ratings: Arc::new(ratings),
        }
    }

    /// PostgreSQL stores sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            clients: Arc::new(postgres::PostgresClientRepository::new(pool.clone())),
            galleries: Arc::new(postgres::PostgresGalleryRepository::new(pool.clone())),
            images: Arc::new(postgres::PostgresImageRepository::new(pool.clone())),
            ratings: Arc::new(postgres::PostgresRatingRepository::new(pool)),
        }
    }

    /// Build the stores selected by `config.storage`.
    pub async fn from_config(config: &AppConfig) -> Result<Self, DomainError> {
        match config.storage {
            StorageBackend::Memory => Ok(Self::in_memory()),
            StorageBackend::Postgres => Ok(Self::postgres(postgres::connect(&config.database).await?)),
        }
    }
}
