//! Rating command and query handlers.

mod get_image_ratings;
mod rate_image;

pub use get_image_ratings::{GetImageRatingsHandler, GetImageRatingsQuery, ImageRatings};
pub use rate_image::{RateImageCommand, RateImageHandler};
