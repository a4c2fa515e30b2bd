//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, metadata)
//! - `client` - Clients that galleries are delivered to
//! - `gallery` - Gallery aggregate, slug and status value objects
//! - `image` - Images and their order within a gallery
//! - `rating` - Client star ratings of images

pub mod client;
pub mod foundation;
pub mod gallery;
pub mod image;
pub mod rating;
