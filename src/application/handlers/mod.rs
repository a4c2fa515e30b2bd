//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Every
//! message type validates its input in `new`, so a handler only ever sees
//! well-formed ids, slugs and star counts.

pub mod client;
pub mod gallery;
pub mod image;
pub mod rating;

mod lookup;

pub use client::{
    CreateClientCommand, CreateClientHandler, DeleteClientCommand, DeleteClientHandler,
    GetClientHandler, GetClientQuery, ListClientsHandler, ListClientsQuery, UpdateClientCommand,
    UpdateClientHandler,
};
pub use gallery::{
    ChangeGalleryStatusCommand, ChangeGalleryStatusHandler, CreateGalleryCommand,
    CreateGalleryHandler, DeleteGalleryCommand, DeleteGalleryHandler, GetGalleryBySlugHandler,
    GetGalleryBySlugQuery, GetGalleryHandler, GetGalleryQuery, ListGalleriesHandler,
    ListGalleriesQuery, UpdateGalleryCommand, UpdateGalleryHandler,
};
pub use image::{
    AddImageCommand, AddImageHandler, ListGalleryImagesHandler, ListGalleryImagesQuery,
    RemoveImageCommand, RemoveImageHandler, ReorderImagesCommand, ReorderImagesHandler,
};
pub use rating::{
    GetImageRatingsHandler, GetImageRatingsQuery, ImageRatings, RateImageCommand,
    RateImageHandler,
};
