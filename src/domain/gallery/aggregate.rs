//! Gallery aggregate entity.
//!
//! A gallery is a named, slug-addressed set of images delivered to one
//! client. Galleries reference their client by ID and do NOT own images;
//! images are managed by the image module.

use serde::{Deserialize, Serialize};

use super::{GallerySlug, GalleryStatus};
use crate::domain::foundation::{
    optional_text, required_text, ClientId, DomainError, ErrorCode, GalleryId, Timestamp,
};

/// Maximum length for a gallery name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length for a gallery description.
pub const MAX_DESCRIPTION_LENGTH: usize = 5000;

/// A gallery that has not been persisted yet (no id assigned).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGallery {
    pub client_id: ClientId,
    pub name: String,
    pub slug: GallerySlug,
    pub description: Option<String>,
    pub status: GalleryStatus,
}

impl NewGallery {
    /// Validates the free-text fields of a new draft gallery.
    pub fn new(
        client_id: ClientId,
        name: &str,
        slug: GallerySlug,
        description: Option<&str>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            client_id,
            name: required_text("name", name, MAX_NAME_LENGTH)?,
            slug,
            description: optional_text("description", description, MAX_DESCRIPTION_LENGTH)?,
            status: GalleryStatus::Draft,
        })
    }
}

/// Gallery aggregate.
///
/// # Invariants
///
/// - `name` is 1-200 characters after trimming
/// - `slug` is unique across all galleries (enforced by the store)
/// - archived galleries cannot be edited, only re-statused or deleted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gallery {
    id: GalleryId,
    client_id: ClientId,
    name: String,
    slug: GallerySlug,
    description: Option<String>,
    status: GalleryStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Gallery {
    /// Reconstitute a gallery from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: GalleryId,
        client_id: ClientId,
        name: String,
        slug: GallerySlug,
        description: Option<String>,
        status: GalleryStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            client_id,
            name,
            slug,
            description,
            status,
            created_at,
            updated_at,
        }
    }

    /// Materializes a new gallery once the store has assigned its id.
    pub fn from_new(id: GalleryId, new: NewGallery, now: Timestamp) -> Self {
        Self {
            id,
            client_id: new.client_id,
            name: new.name,
            slug: new.slug,
            description: new.description,
            status: new.status,
            created_at: now,
            updated_at: now,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> GalleryId {
        self.id
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &GallerySlug {
        &self.slug
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> GalleryStatus {
        self.status
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns true if the gallery belongs to the given client.
    pub fn is_owned_by(&self, client_id: ClientId) -> bool {
        self.client_id == client_id
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Rename the gallery.
    ///
    /// # Errors
    ///
    /// - `GalleryArchived` if the gallery is archived
    /// - `ValidationFailed` if the name is empty or too long
    pub fn rename(&mut self, name: &str) -> Result<(), DomainError> {
        self.ensure_editable()?;
        self.name = required_text("name", name, MAX_NAME_LENGTH)?;
        self.touch();
        Ok(())
    }

    /// Replace the slug. Uniqueness is the caller's responsibility.
    pub fn change_slug(&mut self, slug: GallerySlug) -> Result<(), DomainError> {
        self.ensure_editable()?;
        if self.slug != slug {
            self.slug = slug;
            self.touch();
        }
        Ok(())
    }

    pub fn update_description(&mut self, description: Option<&str>) -> Result<(), DomainError> {
        self.ensure_editable()?;
        self.description = optional_text("description", description, MAX_DESCRIPTION_LENGTH)?;
        self.touch();
        Ok(())
    }

    /// Move the gallery to another status. Returns false if unchanged.
    ///
    /// Every status may move to every other one, including un-archiving.
    pub fn change_status(&mut self, status: GalleryStatus) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        self.touch();
        true
    }

    /// Validates that gallery content can be modified.
    ///
    /// # Errors
    ///
    /// - `GalleryArchived` if the status does not allow editing
    pub fn ensure_editable(&self) -> Result<(), DomainError> {
        if self.status.allows_editing() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::GalleryArchived,
                format!("Gallery {} is archived and cannot be edited", self.id),
            ))
        }
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_gallery() -> Gallery {
        let new = NewGallery::new(
            ClientId::new(1).unwrap(),
            "Summer Wedding",
            GallerySlug::from_name("Summer Wedding").unwrap(),
            None,
        )
        .unwrap();
        Gallery::from_new(GalleryId::new(10).unwrap(), new, Timestamp::now())
    }

    #[test]
    fn new_gallery_is_draft() {
        assert_eq!(test_gallery().status(), GalleryStatus::Draft);
    }

    #[test]
    fn new_gallery_trims_name_and_blank_description() {
        let new = NewGallery::new(
            ClientId::new(1).unwrap(),
            "  Portraits ",
            GallerySlug::from_name("Portraits").unwrap(),
            Some("   "),
        )
        .unwrap();
        assert_eq!(new.name, "Portraits");
        assert!(new.description.is_none());
    }

    #[test]
    fn new_gallery_rejects_empty_name() {
        let result = NewGallery::new(
            ClientId::new(1).unwrap(),
            "   ",
            GallerySlug::from_name("whatever").unwrap(),
            None,
        );
        assert_eq!(result.unwrap_err().code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn rename_updates_name() {
        let mut gallery = test_gallery();
        gallery.rename("Autumn Wedding").unwrap();
        assert_eq!(gallery.name(), "Autumn Wedding");
    }

    #[test]
    fn archived_gallery_rejects_edits() {
        let mut gallery = test_gallery();
        gallery.change_status(GalleryStatus::Archived);

        let err = gallery.rename("Other").unwrap_err();
        assert_eq!(err.code, ErrorCode::GalleryArchived);
        assert!(gallery.update_description(Some("x")).is_err());
        assert!(gallery
            .change_slug(GallerySlug::from_string("other").unwrap())
            .is_err());
    }

    #[test]
    fn change_status_reports_whether_anything_changed() {
        let mut gallery = test_gallery();
        assert!(!gallery.change_status(GalleryStatus::Draft));
        assert!(gallery.change_status(GalleryStatus::Published));
        assert!(gallery.change_status(GalleryStatus::Archived));
        assert!(gallery.change_status(GalleryStatus::Draft));
    }

    #[test]
    fn ownership_check_compares_client() {
        let gallery = test_gallery();
        assert!(gallery.is_owned_by(ClientId::new(1).unwrap()));
        assert!(!gallery.is_owned_by(ClientId::new(2).unwrap()));
    }
}
