//! In-memory implementation of RatingRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::AtomicI64;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::next_id;
use crate::domain::foundation::{ClientId, DomainError, ImageId, RatingId, Timestamp};
use crate::domain::rating::{NewRating, Rating};
use crate::ports::RatingRepository;

/// In-memory rating store keyed by (image, client).
#[derive(Debug, Clone, Default)]
pub struct InMemoryRatingRepository {
    ratings: Arc<RwLock<HashMap<(ImageId, ClientId), Rating>>>,
    ids: Arc<AtomicI64>,
}

impl InMemoryRatingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.ratings.read().await.len()
    }

    /// Drops every rating of the given images. Called by the image store
    /// while it holds its own write lock.
    pub(super) async fn remove_for_images(&self, image_ids: &[ImageId]) -> u64 {
        let mut ratings = self.ratings.write().await;
        let before = ratings.len();
        ratings.retain(|(image_id, _), _| !image_ids.contains(image_id));
        (before - ratings.len()) as u64
    }
}

#[async_trait]
impl RatingRepository for InMemoryRatingRepository {
    async fn upsert(&self, rating: &NewRating) -> Result<Rating, DomainError> {
        let mut ratings = self.ratings.write().await;
        let key = (rating.image_id, rating.client_id);
        let now = Timestamp::now();

        if let Some(existing) = ratings.get_mut(&key) {
            existing.replace_with(rating.clone(), now);
            return Ok(existing.clone());
        }

        let created = Rating::reconstitute(
            RatingId::new(next_id(&self.ids))?,
            rating.image_id,
            rating.client_id,
            rating.stars,
            rating.comment.clone(),
            now,
            now,
        );
        ratings.insert(key, created.clone());
        Ok(created)
    }

    async fn list_by_image(&self, image_id: ImageId) -> Result<Vec<Rating>, DomainError> {
        let mut ratings: Vec<Rating> = self
            .ratings
            .read()
            .await
            .values()
            .filter(|r| r.image_id() == image_id)
            .cloned()
            .collect();
        ratings.sort_by_key(|r| (*r.created_at(), r.id()));
        Ok(ratings)
    }

}
