//! Client aggregate entity.
//!
//! A client is the person a gallery is delivered to and who rates its
//! images. Clients do NOT own their galleries; galleries reference clients.

use serde::{Deserialize, Serialize};

use super::ClientEmail;
use crate::domain::foundation::{
    optional_text, required_text, ClientId, Timestamp, ValidationError,
};

pub const MAX_CLIENT_NAME_LENGTH: usize = 200;
pub const MAX_PHONE_LENGTH: usize = 50;
pub const MAX_NOTES_LENGTH: usize = 5000;

/// Editable client details, validated together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientDetails {
    pub name: String,
    pub email: ClientEmail,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl ClientDetails {
    pub fn new(
        name: &str,
        email: &str,
        phone: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required_text("name", name, MAX_CLIENT_NAME_LENGTH)?,
            email: ClientEmail::new(email)?,
            phone: optional_text("phone", phone, MAX_PHONE_LENGTH)?,
            notes: optional_text("notes", notes, MAX_NOTES_LENGTH)?,
        })
    }
}

/// Client aggregate.
///
/// # Invariants
///
/// - `email` is unique across clients (enforced by the store)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    id: ClientId,
    name: String,
    email: ClientEmail,
    phone: Option<String>,
    notes: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Client {
    /// Reconstitute a client from persistence (no validation).
    pub fn reconstitute(
        id: ClientId,
        details: ClientDetails,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name: details.name,
            email: details.email,
            phone: details.phone,
            notes: details.notes,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &ClientEmail {
        &self.email
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Replace all editable details at once.
    pub fn update(&mut self, details: ClientDetails) {
        self.name = details.name;
        self.email = details.email;
        self.phone = details.phone;
        self.notes = details.notes;
        self.updated_at = Timestamp::now();
    }
}
