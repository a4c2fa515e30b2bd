//! GalleryStatus enum for tracking the publication lifecycle of a gallery.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Publication status of a gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GalleryStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl GalleryStatus {
    /// Every valid status, in lifecycle order.
    pub const ALL: [GalleryStatus; 3] = [
        GalleryStatus::Draft,
        GalleryStatus::Published,
        GalleryStatus::Archived,
    ];

    /// Parses a status tag, ignoring case and surrounding whitespace.
    pub fn from_string(raw: &str) -> Result<Self, ValidationError> {
        match raw.trim().to_lowercase().as_str() {
            "draft" => Ok(GalleryStatus::Draft),
            "published" => Ok(GalleryStatus::Published),
            "archived" => Ok(GalleryStatus::Archived),
            _ => Err(ValidationError::InvalidStatus {
                value: raw.to_string(),
                allowed: Self::ALL
                    .iter()
                    .map(|s| s.value())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    /// Returns the stored tag.
    pub fn value(&self) -> &'static str {
        match self {
            GalleryStatus::Draft => "draft",
            GalleryStatus::Published => "published",
            GalleryStatus::Archived => "archived",
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, GalleryStatus::Draft)
    }

    pub fn is_published(&self) -> bool {
        matches!(self, GalleryStatus::Published)
    }

    pub fn is_archived(&self) -> bool {
        matches!(self, GalleryStatus::Archived)
    }

    /// Human-readable label for admin screens.
    pub fn label(&self) -> &'static str {
        match self {
            GalleryStatus::Draft => "Draft",
            GalleryStatus::Published => "Published",
            GalleryStatus::Archived => "Archived",
        }
    }

    /// Badge color tag for admin screens.
    pub fn color(&self) -> &'static str {
        match self {
            GalleryStatus::Draft => "gray",
            GalleryStatus::Published => "green",
            GalleryStatus::Archived => "orange",
        }
    }

    /// Returns true if gallery content may be changed.
    pub fn allows_editing(&self) -> bool {
        !self.is_archived()
    }
}

impl fmt::Display for GalleryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl FromStr for GalleryStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_draft() {
        assert_eq!(GalleryStatus::default(), GalleryStatus::Draft);
    }

    #[test]
    fn from_string_ignores_case_and_whitespace() {
        assert_eq!(
            GalleryStatus::from_string("PUBLISHED").unwrap(),
            GalleryStatus::from_string("published").unwrap()
        );
        assert_eq!(
            GalleryStatus::from_string("  Archived ").unwrap(),
            GalleryStatus::Archived
        );
    }

    #[test]
    fn from_string_rejects_unknown_values_naming_the_valid_set() {
        let err = GalleryStatus::from_string("deleted").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidStatus {
                value: "deleted".to_string(),
                allowed: "draft, published, archived".to_string(),
            }
        );
        assert!(err.to_string().contains("deleted"));
    }

    #[test]
    fn value_round_trips_for_every_status() {
        for status in GalleryStatus::ALL {
            assert_eq!(GalleryStatus::from_string(status.value()).unwrap(), status);
        }
    }

    #[test]
    fn predicates_match_exactly_one_state() {
        assert!(GalleryStatus::Draft.is_draft());
        assert!(!GalleryStatus::Draft.is_published());
        assert!(GalleryStatus::Published.is_published());
        assert!(!GalleryStatus::Published.is_archived());
        assert!(GalleryStatus::Archived.is_archived());
        assert!(!GalleryStatus::Archived.is_draft());
    }

    #[test]
    fn only_archived_blocks_editing() {
        assert!(GalleryStatus::Draft.allows_editing());
        assert!(GalleryStatus::Published.allows_editing());
        assert!(!GalleryStatus::Archived.allows_editing());
    }

    #[test]
    fn labels_and_colors() {
        assert_eq!(GalleryStatus::Draft.label(), "Draft");
        assert_eq!(GalleryStatus::Published.label(), "Published");
        assert_eq!(GalleryStatus::Archived.label(), "Archived");
        assert_eq!(GalleryStatus::Draft.color(), "gray");
        assert_eq!(GalleryStatus::Published.color(), "green");
        assert_eq!(GalleryStatus::Archived.color(), "orange");
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&GalleryStatus::Published).unwrap(),
            "\"published\""
        );
        let status: GalleryStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(status, GalleryStatus::Archived);
    }
}
