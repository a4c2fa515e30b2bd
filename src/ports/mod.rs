//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application layer and persistence. Adapters implement these ports.
//!
//! - `ClientRepository` - Client persistence, unique emails
//! - `GalleryRepository` - Gallery persistence, unique slugs
//! - `ImageRepository` - Images and their order within a gallery
//! - `RatingRepository` - One rating per client and image

mod client_repository;
mod gallery_repository;
mod image_repository;
mod rating_repository;

pub use client_repository::ClientRepository;
pub use gallery_repository::{GalleryFilter, GalleryRepository, RemovedContent};
pub use image_repository::ImageRepository;
pub use rating_repository::RatingRepository;
