//! Gallery command and query handlers.

mod change_gallery_status;
mod create_gallery;
mod delete_gallery;
mod get_gallery;
mod list_galleries;
mod slugs;
mod update_gallery;

pub use change_gallery_status::{ChangeGalleryStatusCommand, ChangeGalleryStatusHandler};
pub use create_gallery::{CreateGalleryCommand, CreateGalleryHandler};
pub use delete_gallery::{DeleteGalleryCommand, DeleteGalleryHandler};
pub use get_gallery::{
    GetGalleryBySlugHandler, GetGalleryBySlugQuery, GetGalleryHandler, GetGalleryQuery,
};
pub use list_galleries::{ListGalleriesHandler, ListGalleriesQuery};
pub use update_gallery::{UpdateGalleryCommand, UpdateGalleryHandler};
