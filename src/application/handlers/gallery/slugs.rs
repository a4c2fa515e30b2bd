//! Slug allocation against the gallery store.

use std::collections::HashSet;

use crate::domain::foundation::DomainError;
use crate::domain::gallery::GallerySlug;
use crate::ports::GalleryRepository;

/// First free variant of `base`, treating `own` as free.
///
/// Loads every stored slug that any candidate could collide with in one
/// query, including the shortened bases of slugs at the length limit, then
/// probes the set in memory.
pub(crate) async fn allocate_slug(
    galleries: &dyn GalleryRepository,
    base: &GallerySlug,
    own: Option<&GallerySlug>,
) -> Result<GallerySlug, DomainError> {
    let taken: HashSet<String> = galleries
        .slugs_starting_with(base.collision_prefix())
        .await?
        .into_iter()
        .filter(|slug| own.map_or(true, |own| own.value() != slug))
        .collect();

    Ok(base.make_unique(|candidate| taken.contains(candidate))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryGalleryRepository;
    use crate::domain::foundation::ClientId;
    use crate::domain::gallery::{NewGallery, MAX_SLUG_LENGTH};

    async fn store_with(slugs: &[&str]) -> InMemoryGalleryRepository {
        let repo = InMemoryGalleryRepository::new();
        for slug in slugs {
            let slug = GallerySlug::from_string(slug).unwrap();
            repo.create(&NewGallery::new(ClientId::new(1).unwrap(), "Gallery", slug, None).unwrap())
                .await
                .unwrap();
        }
        repo
    }

    fn slug(raw: &str) -> GallerySlug {
        GallerySlug::from_string(raw).unwrap()
    }

    #[tokio::test]
    async fn free_base_is_kept() {
        let repo = store_with(&["other"]).await;
        assert_eq!(allocate_slug(&repo, &slug("wedding"), None).await.unwrap(), slug("wedding"));
    }

    #[tokio::test]
    async fn taken_base_gets_next_suffix() {
        let repo = store_with(&["wedding", "wedding-1"]).await;
        assert_eq!(
            allocate_slug(&repo, &slug("wedding"), None).await.unwrap(),
            slug("wedding-2")
        );
    }

    #[tokio::test]
    async fn slugs_at_the_length_limit_keep_allocating() {
        let repo = InMemoryGalleryRepository::new();
        let base = slug(&"a".repeat(MAX_SLUG_LENGTH));
        let client = ClientId::new(1).unwrap();
        let mut allocated = Vec::new();

        for _ in 0..4 {
            let unique = allocate_slug(&repo, &base, None).await.unwrap();
            let new = NewGallery::new(client, "Gallery", unique.clone(), None).unwrap();
            repo.create(&new).await.unwrap();
            allocated.push(unique.value().to_string());
        }

        let a98 = "a".repeat(98);
        assert_eq!(
            allocated,
            vec![
                "a".repeat(100),
                format!("{}-1", a98),
                format!("{}-2", a98),
                format!("{}-3", a98),
            ]
        );
    }

    #[tokio::test]
    async fn own_slug_counts_as_free() {
        let repo = store_with(&["wedding", "wedding-1"]).await;
        let own = slug("wedding-1");
        assert_eq!(
            allocate_slug(&repo, &slug("wedding"), Some(&own)).await.unwrap(),
            own
        );
    }
}
