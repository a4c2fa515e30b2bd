//! Strongly-typed identifier value objects.
//!
//! Identifiers are positive integers assigned by the store. Constructing one
//! from zero or a negative number is a validation error, which is how
//! commands and queries reject bogus ids at construction time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Generates a positive-integer identifier newtype.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Creates an id, rejecting zero and negative values.
            pub fn new(value: i64) -> Result<Self, ValidationError> {
                if value <= 0 {
                    return Err(ValidationError::out_of_range($field, 1, i64::MAX, value));
                }
                Ok(Self(value))
            }

            /// Returns the raw integer value.
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s.trim().parse::<i64>().map_err(|e| {
                    ValidationError::invalid_format($field, e.to_string())
                })?;
                Self::new(value)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = ValidationError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of a client (the person a gallery is delivered to).
    ClientId,
    "client_id"
);

define_id!(
    /// Identifier of a gallery.
    GalleryId,
    "gallery_id"
);

define_id!(
    /// Identifier of an image within a gallery.
    ImageId,
    "image_id"
);

define_id!(
    /// Identifier of a client's rating of an image.
    RatingId,
    "rating_id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_values() {
        let id = GalleryId::new(42).unwrap();
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn rejects_zero_and_negative_values() {
        assert!(GalleryId::new(0).is_err());
        match ClientId::new(-3) {
            Err(ValidationError::OutOfRange { field, actual, .. }) => {
                assert_eq!(field, "client_id");
                assert_eq!(actual, -3);
            }
            other => panic!("Expected OutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn parses_from_string() {
        let id: ImageId = " 17 ".parse().unwrap();
        assert_eq!(id.value(), 17);
        assert!("abc".parse::<ImageId>().is_err());
        assert!("0".parse::<ImageId>().is_err());
    }

    #[test]
    fn displays_as_integer() {
        assert_eq!(format!("{}", RatingId::new(9).unwrap()), "9");
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&GalleryId::new(5).unwrap()).unwrap();
        assert_eq!(json, "5");
    }

    #[test]
    fn deserialization_rejects_non_positive() {
        let ok: Result<GalleryId, _> = serde_json::from_str("12");
        assert!(ok.is_ok());
        let bad: Result<GalleryId, _> = serde_json::from_str("-1");
        assert!(bad.is_err());
    }
}
