//! Image domain module.
//!
//! Images belong to exactly one gallery and carry a position within it.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    optional_text, required_text, GalleryId, ImageId, Timestamp, ValidationError,
};

pub const MAX_FILE_NAME_LENGTH: usize = 255;
pub const MAX_URL_LENGTH: usize = 2048;
pub const MAX_TITLE_LENGTH: usize = 200;

/// An image that has not been persisted yet.
///
/// The store assigns the id and appends the image after the gallery's
/// current last position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    pub gallery_id: GalleryId,
    pub file_name: String,
    pub url: String,
    pub title: Option<String>,
}

impl NewImage {
    pub fn new(
        gallery_id: GalleryId,
        file_name: &str,
        url: &str,
        title: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            gallery_id,
            file_name: required_text("file_name", file_name, MAX_FILE_NAME_LENGTH)?,
            url: validate_url(url)?,
            title: optional_text("title", title, MAX_TITLE_LENGTH)?,
        })
    }
}

fn validate_url(url: &str) -> Result<String, ValidationError> {
    let url = required_text("url", url, MAX_URL_LENGTH)?;
    let lower = url.to_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return Err(ValidationError::invalid_format(
            "url",
            "must start with http:// or https://",
        ));
    }
    Ok(url)
}

/// Image entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    id: ImageId,
    gallery_id: GalleryId,
    file_name: String,
    url: String,
    title: Option<String>,
    sort_order: u32,
    created_at: Timestamp,
}

impl Image {
    /// Reconstitute an image from persistence (no validation).
    pub fn reconstitute(
        id: ImageId,
        gallery_id: GalleryId,
        file_name: String,
        url: String,
        title: Option<String>,
        sort_order: u32,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            gallery_id,
            file_name,
            url,
            title,
            sort_order,
            created_at,
        }
    }

    pub fn from_new(id: ImageId, new: NewImage, sort_order: u32, now: Timestamp) -> Self {
        Self::reconstitute(id, new.gallery_id, new.file_name, new.url, new.title, sort_order, now)
    }

    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn gallery_id(&self) -> GalleryId {
        self.gallery_id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn sort_order(&self) -> u32 {
        self.sort_order
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn set_sort_order(&mut self, sort_order: u32) {
        self.sort_order = sort_order;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery() -> GalleryId {
        GalleryId::new(1).unwrap()
    }

    #[test]
    fn new_image_accepts_http_and_https() {
        assert!(NewImage::new(gallery(), "a.jpg", "https://cdn.example.com/a.jpg", None).is_ok());
        assert!(NewImage::new(gallery(), "a.jpg", "HTTP://cdn.example.com/a.jpg", None).is_ok());
    }

    #[test]
    fn new_image_rejects_other_schemes() {
        let err = NewImage::new(gallery(), "a.jpg", "ftp://example.com/a.jpg", None).unwrap_err();
        assert_eq!(err.field(), "url");
    }

    #[test]
    fn new_image_requires_file_name() {
        assert_eq!(
            NewImage::new(gallery(), " ", "https://example.com/a.jpg", None),
            Err(ValidationError::empty_field("file_name"))
        );
    }

    #[test]
    fn from_new_keeps_assigned_position() {
        let new = NewImage::new(gallery(), "a.jpg", "https://example.com/a.jpg", Some("Kiss"))
            .unwrap();
        let image = Image::from_new(ImageId::new(3).unwrap(), new, 4, Timestamp::now());
        assert_eq!(image.sort_order(), 4);
        assert_eq!(image.title(), Some("Kiss"));
    }
}
