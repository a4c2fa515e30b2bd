//! GetClientHandler - Query handler for retrieving one client.

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::bus::{Query, QueryHandler};
use crate::application::handlers::lookup::require_client;
use crate::domain::client::Client;
use crate::domain::foundation::{ClientId, DomainError, ValidationError};
use crate::ports::ClientRepository;

/// Query to get a client by ID.
#[derive(Debug, Clone, Copy)]
pub struct GetClientQuery {
    pub client_id: ClientId,
}

impl GetClientQuery {
    pub fn new(client_id: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            client_id: ClientId::new(client_id)?,
        })
    }
}

impl Query for GetClientQuery {
    type Output = Client;
}

/// Handler for retrieving clients.
pub struct GetClientHandler {
    clients: Arc<dyn ClientRepository>,
}

impl GetClientHandler {
    pub fn new(clients: Arc<dyn ClientRepository>) -> Self {
        Self { clients }
    }
}

#[async_trait]
impl QueryHandler for GetClientHandler {
    type Query = GetClientQuery;

    async fn handle(&self, query: GetClientQuery) -> Result<Client, DomainError> {
        require_client(self.clients.as_ref(), query.client_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryClientRepository;
    use crate::domain::client::ClientDetails;
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn returns_existing_client() {
        let clients = Arc::new(InMemoryClientRepository::new());
        let created = clients
            .create(&ClientDetails::new("Anna", "anna@example.com", None, None).unwrap())
            .await
            .unwrap();
        let handler = GetClientHandler::new(clients);

        let client = handler
            .handle(GetClientQuery::new(created.id().value()).unwrap())
            .await
            .unwrap();

        assert_eq!(client, created);
    }

    #[tokio::test]
    async fn missing_client_is_not_found() {
        let handler = GetClientHandler::new(Arc::new(InMemoryClientRepository::new()));

        let err = handler
            .handle(GetClientQuery::new(3).unwrap())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ClientNotFound);
        assert_eq!(err.details.get("client_id"), Some(&"3".to_string()));
    }
}
