//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, command metadata and error types
//! that form the vocabulary of the gallery domain.

mod command;
mod errors;
mod ids;
mod text;
mod timestamp;

pub use command::{CommandMetadata, SYSTEM_ACTOR};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ClientId, GalleryId, ImageId, RatingId};
pub use text::{optional_text, required_text};
pub use timestamp::Timestamp;
