//! Client repository port.

use async_trait::async_trait;

use crate::domain::client::{Client, ClientDetails, ClientEmail};
use crate::domain::foundation::{ClientId, DomainError};

/// Repository port for Client persistence.
///
/// Implementations must keep client emails unique and report a duplicate
/// with `Conflict`.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Insert a new client and return it with its assigned id.
    async fn create(&self, details: &ClientDetails) -> Result<Client, DomainError>;

    /// Update an existing client.
    ///
    /// # Errors
    ///
    /// - `ClientNotFound` if the client doesn't exist
    /// - `Conflict` if the email belongs to another client
    async fn update(&self, client: &Client) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, DomainError>;

    async fn find_by_email(&self, email: &ClientEmail) -> Result<Option<Client>, DomainError>;

    /// All clients ordered by name.
    async fn list(&self) -> Result<Vec<Client>, DomainError>;

    /// # Errors
    ///
    /// - `ClientNotFound` if the client doesn't exist
    async fn delete(&self, id: ClientId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ClientRepository) {}
    }
}
