//! In-memory implementation of GalleryRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::AtomicI64;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{next_id, InMemoryImageRepository};
use crate::domain::foundation::{ClientId, DomainError, ErrorCode, GalleryId, Timestamp};
use crate::domain::gallery::{Gallery, GallerySlug, NewGallery};
use crate::ports::{GalleryFilter, GalleryRepository, RemovedContent};

/// In-memory gallery store.
///
/// Locks are always taken gallery store first, then images, then ratings.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGalleryRepository {
    galleries: Arc<RwLock<HashMap<GalleryId, Gallery>>>,
    ids: Arc<AtomicI64>,
    /// Image store cleared along with deleted galleries.
    images: Option<InMemoryImageRepository>,
}

impl InMemoryGalleryRepository {
    /// A standalone store; deleting a gallery touches no images.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose deletes also remove the gallery's images, and through
    /// `images`' own link, their ratings.
    pub fn with_images(images: InMemoryImageRepository) -> Self {
        Self {
            images: Some(images),
            ..Self::default()
        }
    }

    /// Number of stored galleries.
    pub async fn len(&self) -> usize {
        self.galleries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn slug_taken(slug: &GallerySlug) -> DomainError {
    DomainError::new(
        ErrorCode::SlugTaken,
        format!("Gallery slug already in use: {}", slug),
    )
    .with_detail("slug", slug.value())
}

fn not_found(id: GalleryId) -> DomainError {
    DomainError::new(ErrorCode::GalleryNotFound, format!("Gallery not found: {}", id))
}

#[async_trait]
impl GalleryRepository for InMemoryGalleryRepository {
    async fn create(&self, gallery: &NewGallery) -> Result<Gallery, DomainError> {
        let mut galleries = self.galleries.write().await;
        if galleries.values().any(|g| g.slug() == &gallery.slug) {
            return Err(slug_taken(&gallery.slug));
        }

        let id = GalleryId::new(next_id(&self.ids))?;
        let created = Gallery::from_new(id, gallery.clone(), Timestamp::now());
        galleries.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, gallery: &Gallery) -> Result<(), DomainError> {
        let mut galleries = self.galleries.write().await;
        if !galleries.contains_key(&gallery.id()) {
            return Err(not_found(gallery.id()));
        }
        if galleries
            .values()
            .any(|g| g.id() != gallery.id() && g.slug() == gallery.slug())
        {
            return Err(slug_taken(gallery.slug()));
        }
        galleries.insert(gallery.id(), gallery.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: GalleryId) -> Result<Option<Gallery>, DomainError> {
        Ok(self.galleries.read().await.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &GallerySlug) -> Result<Option<Gallery>, DomainError> {
        Ok(self
            .galleries
            .read()
            .await
            .values()
            .find(|g| g.slug() == slug)
            .cloned())
    }

    async fn slugs_starting_with(&self, prefix: &str) -> Result<Vec<String>, DomainError> {
        Ok(self
            .galleries
            .read()
            .await
            .values()
            .map(|g| g.slug().value())
            .filter(|slug| slug.starts_with(prefix))
            .map(str::to_string)
            .collect())
    }

    async fn list(&self, filter: &GalleryFilter) -> Result<Vec<Gallery>, DomainError> {
        let mut galleries: Vec<Gallery> = self
            .galleries
            .read()
            .await
            .values()
            .filter(|g| filter.matches(g))
            .cloned()
            .collect();
        galleries.sort_by(|a, b| {
            b.created_at()
                .cmp(a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(galleries)
    }

    async fn count_by_client(&self, client_id: ClientId) -> Result<u32, DomainError> {
        Ok(self
            .galleries
            .read()
            .await
            .values()
            .filter(|g| g.client_id() == client_id)
            .count() as u32)
    }

    async fn delete(&self, id: GalleryId) -> Result<RemovedContent, DomainError> {
        let mut galleries = self.galleries.write().await;
        if !galleries.contains_key(&id) {
            return Err(not_found(id));
        }

        let removed = match &self.images {
            Some(images) => images.remove_gallery_content(id).await,
            None => RemovedContent::default(),
        };
        galleries.remove(&id);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gallery::GalleryStatus;

    fn new_gallery(client: i64, name: &str) -> NewGallery {
        NewGallery::new(
            ClientId::new(client).unwrap(),
            name,
            GallerySlug::from_name(name).unwrap(),
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let repo = InMemoryGalleryRepository::new();

        let first = repo.create(&new_gallery(1, "First")).await.unwrap();
        let second = repo.create(&new_gallery(1, "Second")).await.unwrap();

        assert_eq!(first.id().value(), 1);
        assert_eq!(second.id().value(), 2);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_slug() {
        let repo = InMemoryGalleryRepository::new();
        repo.create(&new_gallery(1, "Wedding")).await.unwrap();

        let err = repo.create(&new_gallery(2, "Wedding")).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::SlugTaken);
    }

    #[tokio::test]
    async fn update_rejects_slug_of_another_gallery() {
        let repo = InMemoryGalleryRepository::new();
        repo.create(&new_gallery(1, "Wedding")).await.unwrap();
        let mut other = repo.create(&new_gallery(1, "Portraits")).await.unwrap();

        other
            .change_slug(GallerySlug::from_string("wedding").unwrap())
            .unwrap();

        assert_eq!(repo.update(&other).await.unwrap_err().code, ErrorCode::SlugTaken);
    }

    #[tokio::test]
    async fn update_missing_gallery_fails() {
        let repo = InMemoryGalleryRepository::new();
        let gallery = Gallery::from_new(
            GalleryId::new(99).unwrap(),
            new_gallery(1, "Ghost"),
            Timestamp::now(),
        );

        assert_eq!(
            repo.update(&gallery).await.unwrap_err().code,
            ErrorCode::GalleryNotFound
        );
    }

    #[tokio::test]
    async fn slugs_starting_with_matches_plain_prefix() {
        let repo = InMemoryGalleryRepository::new();
        for name in ["foo", "foo-1", "foobar", "foo-bar", "bar", "afoo"] {
            repo.create(&new_gallery(1, name)).await.unwrap();
        }

        let mut slugs = repo.slugs_starting_with("foo").await.unwrap();
        slugs.sort();

        assert_eq!(slugs, vec!["foo", "foo-1", "foo-bar", "foobar"]);
    }

    #[tokio::test]
    async fn list_filters_and_orders_newest_first() {
        let repo = InMemoryGalleryRepository::new();
        let a = repo.create(&new_gallery(1, "Alpha")).await.unwrap();
        let b = repo.create(&new_gallery(1, "Beta")).await.unwrap();
        let mut c = repo.create(&new_gallery(2, "Gamma")).await.unwrap();
        c.change_status(GalleryStatus::Published);
        repo.update(&c).await.unwrap();

        let all = repo.list(&GalleryFilter::default()).await.unwrap();
        let ids: Vec<_> = all.iter().map(|g| g.id()).collect();
        assert_eq!(ids, vec![c.id(), b.id(), a.id()]);

        let client_one = repo
            .list(&GalleryFilter {
                client_id: Some(ClientId::new(1).unwrap()),
                status: None,
            })
            .await
            .unwrap();
        assert_eq!(client_one.len(), 2);

        let published = repo
            .list(&GalleryFilter {
                client_id: None,
                status: Some(GalleryStatus::Published),
            })
            .await
            .unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].id(), c.id());
    }

    #[tokio::test]
    async fn count_and_delete() {
        let repo = InMemoryGalleryRepository::new();
        let gallery = repo.create(&new_gallery(3, "Alpha")).await.unwrap();

        assert_eq!(repo.count_by_client(ClientId::new(3).unwrap()).await.unwrap(), 1);
        repo.delete(gallery.id()).await.unwrap();
        assert!(repo.is_empty().await);
        assert_eq!(
            repo.delete(gallery.id()).await.unwrap_err().code,
            ErrorCode::GalleryNotFound
        );
    }

    #[tokio::test]
    async fn delete_cascades_through_linked_stores() {
        use crate::adapters::memory::InMemoryRatingRepository;
        use crate::domain::image::NewImage;
        use crate::domain::rating::{NewRating, Stars};
        use crate::ports::{ImageRepository, RatingRepository};

        let ratings = InMemoryRatingRepository::new();
        let images = InMemoryImageRepository::with_ratings(ratings.clone());
        let repo = InMemoryGalleryRepository::with_images(images.clone());
        let client = ClientId::new(1).unwrap();

        let doomed = repo.create(&new_gallery(1, "Wedding")).await.unwrap();
        let kept = repo.create(&new_gallery(1, "Portraits")).await.unwrap();
        for gallery in [&doomed, &kept] {
            let new_image =
                NewImage::new(gallery.id(), "a.jpg", "https://cdn.example.com/a.jpg", None)
                    .unwrap();
            let image = images.create(&new_image).await.unwrap();
            ratings
                .upsert(&NewRating::new(image.id(), client, Stars::new(3).unwrap(), None).unwrap())
                .await
                .unwrap();
        }

        let removed = repo.delete(doomed.id()).await.unwrap();

        assert_eq!(removed, RemovedContent { images: 1, ratings: 1 });
        assert_eq!(repo.len().await, 1);
        assert_eq!(images.len().await, 1);
        assert_eq!(ratings.len().await, 1);
    }

    #[tokio::test]
    async fn failed_delete_leaves_content_alone() {
        use crate::domain::image::NewImage;
        use crate::ports::ImageRepository;

        let images = InMemoryImageRepository::new();
        let repo = InMemoryGalleryRepository::with_images(images.clone());
        let orphan = NewImage::new(
            GalleryId::new(9).unwrap(),
            "a.jpg",
            "https://cdn.example.com/a.jpg",
            None,
        )
        .unwrap();
        images.create(&orphan).await.unwrap();

        let err = repo.delete(GalleryId::new(9).unwrap()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::GalleryNotFound);
        assert_eq!(images.len().await, 1);
    }
}
