//! Gallery domain module.
//!
//! Galleries, their URL slugs and their publication status.

mod aggregate;
mod slug;
mod status;

pub use aggregate::{Gallery, NewGallery, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH};
pub use slug::{
    normalize as normalize_slug, GallerySlug, SlugError, MAX_SLUG_LENGTH, MAX_UNIQUE_ATTEMPTS,
    MIN_SLUG_LENGTH, RESERVED_SLUGS,
};
pub use status::GalleryStatus;
