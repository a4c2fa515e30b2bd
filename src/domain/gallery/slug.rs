//! GallerySlug value object.
//!
//! A slug is the canonical URL-safe identifier of a gallery. Both entry
//! points run the same pipeline: normalize the raw text, then validate the
//! result. Two inputs that normalize to the same string produce equal slugs.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Minimum slug length after normalization.
pub const MIN_SLUG_LENGTH: usize = 2;

/// Maximum slug length after normalization.
pub const MAX_SLUG_LENGTH: usize = 100;

/// Number of existence checks `make_unique` performs before giving up.
pub const MAX_UNIQUE_ATTEMPTS: u32 = 1000;

/// Slugs that collide with host routes and feeds.
pub const RESERVED_SLUGS: [&str; 7] = [
    "admin",
    "wp-admin",
    "wp-content",
    "wp-includes",
    "feed",
    "rss",
    "atom",
];

static SLUG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9\-_]+$").expect("slug pattern is a valid regex")
});

/// Errors produced while deriving a unique slug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlugError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("No free slug found for '{base}' after {attempts} attempts")]
    ResourceExhausted { base: String, attempts: u32 },
}

impl From<SlugError> for DomainError {
    fn from(err: SlugError) -> Self {
        match err {
            SlugError::Invalid(inner) => inner.into(),
            SlugError::ResourceExhausted { ref base, attempts } => {
                DomainError::new(ErrorCode::ResourceExhausted, err.to_string())
                    .with_detail("slug", base.clone())
                    .with_detail("attempts", attempts.to_string())
            }
        }
    }
}

/// Normalized, validated gallery slug.
///
/// # Invariants
///
/// - lowercase ASCII letters, digits, `-` and `_` only
/// - 2 to 100 characters
/// - not one of [`RESERVED_SLUGS`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GallerySlug(String);

impl GallerySlug {
    /// Derives a slug from a free-text gallery title.
    pub fn from_name(name: &str) -> Result<Self, ValidationError> {
        Self::parse(name)
    }

    /// Accepts an already slug-shaped string, normalizing it the same way.
    pub fn from_string(raw: &str) -> Result<Self, ValidationError> {
        Self::parse(raw)
    }

    /// Returns true if `raw` would produce a valid slug.
    pub fn is_valid(raw: &str) -> bool {
        Self::parse(raw).is_ok()
    }

    /// Returns the normalized value.
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Finds the first variant of this slug that `exists` reports as free.
    ///
    /// Checks the slug itself first, then `slug-1`, `slug-2`, and so on.
    /// The predicate is called at most [`MAX_UNIQUE_ATTEMPTS`] times.
    ///
    /// The result is only a pre-check: another writer can claim the slug
    /// before it is persisted, so the store must enforce uniqueness too.
    pub fn make_unique<F>(&self, mut exists: F) -> Result<GallerySlug, SlugError>
    where
        F: FnMut(&str) -> bool,
    {
        if !exists(&self.0) {
            return Ok(self.clone());
        }

        for counter in 1..MAX_UNIQUE_ATTEMPTS {
            let candidate = self.with_suffix(counter);
            if !exists(&candidate) {
                return Ok(Self::parse(&candidate)?);
            }
        }

        Err(SlugError::ResourceExhausted {
            base: self.0.clone(),
            attempts: MAX_UNIQUE_ATTEMPTS,
        })
    }

    /// Prefix shared by every candidate `make_unique` can produce.
    ///
    /// Equals the slug unless it is long enough that the widest suffix
    /// forces the base to be cut. Stores look up taken slugs by this prefix.
    pub fn collision_prefix(&self) -> &str {
        let widest_suffix = format!("-{}", MAX_UNIQUE_ATTEMPTS - 1);
        self.base_within(MAX_SLUG_LENGTH - widest_suffix.len())
    }

    /// Appends `-counter`, shortening the base so the result stays in bounds.
    fn with_suffix(&self, counter: u32) -> String {
        let suffix = format!("-{}", counter);
        let base = self.base_within(MAX_SLUG_LENGTH - suffix.len());
        format!("{}{}", base, suffix)
    }

    fn base_within(&self, room: usize) -> &str {
        // Normalized slugs are pure ASCII, so byte slicing is safe.
        if self.0.len() > room {
            self.0[..room].trim_end_matches('-')
        } else {
            &self.0
        }
    }

    fn parse(raw: &str) -> Result<Self, ValidationError> {
        let normalized = normalize(raw);
        validate(&normalized)?;
        Ok(Self(normalized))
    }
}

/// Runs the normalization pipeline over arbitrary input.
///
/// trim, lowercase, transliterate, strip disallowed characters, collapse
/// separator runs into one hyphen, trim hyphens at both ends.
pub fn normalize(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();

    let mut transliterated = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        match transliterate(c) {
            Some(replacement) => transliterated.push_str(replacement),
            None => transliterated.push(c),
        }
    }

    let mut slug = String::with_capacity(transliterated.len());
    let mut pending_separator = false;
    for c in transliterated.chars() {
        if is_separator(c) {
            pending_separator = true;
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            // Leading separators are dropped, trailing ones never flushed.
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        }
    }

    slug
}

/// Only ASCII whitespace separates words; other spaces such as NBSP are
/// stripped like any other disallowed character.
fn is_separator(c: char) -> bool {
    c == '-' || c == '_' || c.is_ascii_whitespace()
}

fn transliterate(c: char) -> Option<&'static str> {
    let replacement = match c {
        'ä' => "ae",
        'ö' => "oe",
        'ü' => "ue",
        'ß' => "ss",
        'à' | 'á' => "a",
        'è' | 'é' => "e",
        'ì' | 'í' => "i",
        'ò' | 'ó' => "o",
        'ù' | 'ú' => "u",
        _ => return None,
    };
    Some(replacement)
}

fn validate(slug: &str) -> Result<(), ValidationError> {
    if slug.is_empty() {
        return Err(ValidationError::empty_field("slug"));
    }
    if slug.len() < MIN_SLUG_LENGTH {
        return Err(ValidationError::too_short("slug", MIN_SLUG_LENGTH, slug.len()));
    }
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(ValidationError::too_long("slug", MAX_SLUG_LENGTH, slug.len()));
    }
    if !SLUG_PATTERN.is_match(slug) {
        return Err(ValidationError::invalid_format(
            "slug",
            "only lowercase letters, digits, hyphens and underscores are allowed",
        ));
    }
    if RESERVED_SLUGS.contains(&slug) {
        return Err(ValidationError::reserved("slug", slug));
    }
    Ok(())
}

impl fmt::Display for GallerySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for GallerySlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for GallerySlug {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl TryFrom<String> for GallerySlug {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_string(&value)
    }
}

impl From<GallerySlug> for String {
    fn from(slug: GallerySlug) -> String {
        slug.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn slug(raw: &str) -> GallerySlug {
        GallerySlug::from_string(raw).unwrap()
    }

    // Normalization

    #[test]
    fn from_name_transliterates_and_strips_punctuation() {
        assert_eq!(
            GallerySlug::from_name("Müller & Söhne!").unwrap().value(),
            "mueller-soehne"
        );
    }

    #[test]
    fn from_name_handles_accented_vowels() {
        assert_eq!(slug("Café à la Crème").value(), "cafe-a-la-creme");
        assert_eq!(slug("Straße").value(), "strasse");
    }

    #[test]
    fn uppercase_umlauts_are_lowercased_before_transliteration() {
        assert_eq!(slug("ÜBER ÄRGER").value(), "ueber-aerger");
    }

    #[test]
    fn separator_runs_collapse_into_one_hyphen() {
        assert_eq!(slug("summer -- _ wedding").value(), "summer-wedding");
        assert_eq!(slug("snake_case_name").value(), "snake-case-name");
    }

    #[test]
    fn leading_and_trailing_separators_are_trimmed() {
        assert_eq!(slug("  --Portraits 2024__  ").value(), "portraits-2024");
    }

    #[test]
    fn non_ascii_spaces_are_dropped_not_separators() {
        assert_eq!(slug("summer\u{a0}wedding").value(), "summerwedding");
        assert_eq!(slug("summer\twedding").value(), "summer-wedding");
    }

    #[test]
    fn characters_outside_the_transliteration_table_are_dropped() {
        assert_eq!(slug("naïve façade").value(), "nave-faade");
    }

    #[test]
    fn from_name_and_from_string_agree() {
        let raw = "  Hochzeit Müller ";
        assert_eq!(
            GallerySlug::from_name(raw).unwrap(),
            GallerySlug::from_string(raw).unwrap()
        );
    }

    #[test]
    fn differently_cased_inputs_are_equal() {
        assert_eq!(slug("Family Shoot"), slug("family-shoot"));
    }

    // Validation

    #[test]
    fn reserved_words_are_rejected_case_and_whitespace_insensitively() {
        assert_eq!(
            GallerySlug::from_string("  Admin  "),
            Err(ValidationError::reserved("slug", "admin"))
        );
        assert!(GallerySlug::from_string("WP Admin").is_err());
        assert!(GallerySlug::from_string("feed").is_err());
        assert!(GallerySlug::from_string("RSS").is_err());
    }

    #[test]
    fn single_character_is_too_short() {
        assert_eq!(
            GallerySlug::from_string("a"),
            Err(ValidationError::too_short("slug", 2, 1))
        );
    }

    #[test]
    fn input_without_usable_characters_is_empty() {
        assert_eq!(
            GallerySlug::from_string("!!! ???"),
            Err(ValidationError::empty_field("slug"))
        );
        assert!(GallerySlug::from_string("").is_err());
    }

    #[test]
    fn overlong_input_is_rejected() {
        let long = "a".repeat(MAX_SLUG_LENGTH + 1);
        assert!(matches!(
            GallerySlug::from_string(&long),
            Err(ValidationError::TooLong { max: 100, actual: 101, .. })
        ));
        assert!(GallerySlug::from_string(&"a".repeat(MAX_SLUG_LENGTH)).is_ok());
    }

    #[test]
    fn is_valid_probes_without_failing() {
        assert!(GallerySlug::is_valid("Summer Wedding"));
        assert!(!GallerySlug::is_valid("admin"));
        assert!(!GallerySlug::is_valid("x"));
    }

    // Uniqueness

    #[test]
    fn make_unique_returns_base_when_free() {
        let base = slug("foo");
        assert_eq!(base.make_unique(|_| false).unwrap(), base);
    }

    #[test]
    fn make_unique_appends_first_free_counter() {
        let taken: HashSet<&str> = ["foo", "foo-1"].into_iter().collect();
        let unique = slug("foo").make_unique(|s| taken.contains(s)).unwrap();
        assert_eq!(unique.value(), "foo-2");
    }

    #[test]
    fn make_unique_gives_up_after_exactly_max_attempts() {
        let mut calls = 0u32;
        let result = slug("foo").make_unique(|_| {
            calls += 1;
            true
        });

        assert_eq!(calls, MAX_UNIQUE_ATTEMPTS);
        assert_eq!(
            result,
            Err(SlugError::ResourceExhausted {
                base: "foo".to_string(),
                attempts: MAX_UNIQUE_ATTEMPTS,
            })
        );
    }

    #[test]
    fn make_unique_keeps_suffixed_slug_within_max_length() {
        let base = slug(&format!("{}-{}", "a".repeat(97), "bc"));
        assert_eq!(base.value().len(), MAX_SLUG_LENGTH);

        let unique = base.make_unique(|s| s == base.value()).unwrap();
        assert_eq!(unique.value().len(), 99);
        assert!(unique.value().ends_with("a-1"));
        assert!(!unique.value().contains("--"));
    }

    #[test]
    fn collision_prefix_is_the_slug_when_suffixes_fit() {
        assert_eq!(slug("summer-wedding").collision_prefix(), "summer-wedding");

        let long = slug(&"a".repeat(MAX_SLUG_LENGTH));
        assert_eq!(long.collision_prefix(), "a".repeat(96));
    }

    #[test]
    fn every_candidate_starts_with_the_collision_prefix() {
        let base = slug(&format!("{}-{}", "a".repeat(95), "bbbb"));
        assert_eq!(base.collision_prefix(), "a".repeat(95));

        let mut candidates = Vec::new();
        let _ = base.make_unique(|s| {
            candidates.push(s.to_string());
            true
        });

        assert_eq!(candidates.len() as u32, MAX_UNIQUE_ATTEMPTS);
        assert!(candidates
            .iter()
            .all(|c| c.starts_with(base.collision_prefix())));
    }

    #[test]
    fn resource_exhausted_maps_to_domain_error() {
        let err: DomainError = SlugError::ResourceExhausted {
            base: "foo".to_string(),
            attempts: 1000,
        }
        .into();
        assert_eq!(err.code, ErrorCode::ResourceExhausted);
        assert_eq!(err.details.get("slug"), Some(&"foo".to_string()));
    }

    // Conversions

    #[test]
    fn serializes_as_bare_string() {
        assert_eq!(
            serde_json::to_string(&slug("Summer Wedding")).unwrap(),
            "\"summer-wedding\""
        );
    }

    #[test]
    fn deserialization_normalizes_and_validates() {
        let parsed: GallerySlug = serde_json::from_str("\"Summer Wedding\"").unwrap();
        assert_eq!(parsed.value(), "summer-wedding");
        assert!(serde_json::from_str::<GallerySlug>("\"admin\"").is_err());
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(raw in any::<String>()) {
            if let Ok(first) = GallerySlug::from_string(&raw) {
                let second = GallerySlug::from_string(first.value()).unwrap();
                prop_assert_eq!(first, second);
            }
        }

        #[test]
        fn normalized_output_never_has_edge_or_double_hyphens(raw in "[ -~äöüßÀ-ÿ\t]{0,64}") {
            let normalized = normalize(&raw);
            prop_assert!(!normalized.starts_with('-'));
            prop_assert!(!normalized.ends_with('-'));
            prop_assert!(!normalized.contains("--"));
            prop_assert!(normalized.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }
    }
}
