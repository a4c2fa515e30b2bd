//! Image command and query handlers.

mod add_image;
mod list_gallery_images;
mod remove_image;
mod reorder_images;

pub use add_image::{AddImageCommand, AddImageHandler};
pub use list_gallery_images::{ListGalleryImagesHandler, ListGalleryImagesQuery};
pub use remove_image::{RemoveImageCommand, RemoveImageHandler};
pub use reorder_images::{ReorderImagesCommand, ReorderImagesHandler};
