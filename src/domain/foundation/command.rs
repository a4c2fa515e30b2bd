//! Command metadata for CQRS handlers.
//!
//! Instead of each handler accepting `actor`, `correlation_id` and `source`
//! separately, they accept a single `CommandMetadata` that the command bus
//! forwards untouched.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Actor name used when no user initiated the command.
pub const SYSTEM_ACTOR: &str = "system";

/// Metadata context for command handlers.
///
/// Carries correlation and actor context through command processing so
/// that every log line emitted for one request can be tied together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// Who is executing this command (an admin login, a client email, `system`).
    pub actor: String,

    /// Links related operations across a single request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Source of this command (e.g., "admin", "client-portal", "import").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata for the given actor.
    pub fn new(actor: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            correlation_id: None,
            source: None,
        }
    }

    /// Metadata for commands not initiated by a user.
    pub fn system() -> Self {
        Self::new(SYSTEM_ACTOR)
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: Add source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns the correlation ID only if explicitly set.
    pub fn correlation_id_opt(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    /// Returns the source if set.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Creates a test fixture. Only available in test builds.
    pub fn test_fixture() -> Self {
        Self::new("test-admin")
            .with_correlation_id("test-correlation-id")
            .with_source("test")
    }
}
