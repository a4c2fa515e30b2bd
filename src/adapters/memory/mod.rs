//! In-memory repository adapters for testing and development.
//!
//! Each store keeps its rows in a `tokio::sync::RwLock<HashMap>` and hands
//! out ids from an atomic counter. They enforce the same uniqueness rules as
//! the SQL schema so handler behavior does not depend on the backend.
//! Linked stores (`with_images`, `with_ratings`) cascade deletes the way the
//! PostgreSQL adapters do inside one transaction.
//! Not suitable for multi-process deployments.

mod client_repository;
mod gallery_repository;
mod image_repository;
mod rating_repository;

pub use client_repository::InMemoryClientRepository;
pub use gallery_repository::InMemoryGalleryRepository;
pub use image_repository::InMemoryImageRepository;
pub use rating_repository::InMemoryRatingRepository;

use std::sync::atomic::{AtomicI64, Ordering};

/// Returns the next id from a counter that starts at zero.
fn next_id(counter: &AtomicI64) -> i64 {
    counter.fetch_add(1, Ordering::SeqCst) + 1
}
