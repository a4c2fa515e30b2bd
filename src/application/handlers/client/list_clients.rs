//! ListClientsHandler - Query handler for the client directory.

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::bus::{Query, QueryHandler};
use crate::domain::client::Client;
use crate::domain::foundation::DomainError;
use crate::ports::ClientRepository;

/// Query to list every client, ordered by name.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListClientsQuery;

impl Query for ListClientsQuery {
    type Output = Vec<Client>;
}

/// Handler for listing clients.
pub struct ListClientsHandler {
    clients: Arc<dyn ClientRepository>,
}

impl ListClientsHandler {
    pub fn new(clients: Arc<dyn ClientRepository>) -> Self {
        Self { clients }
    }
}

#[async_trait]
impl QueryHandler for ListClientsHandler {
    type Query = ListClientsQuery;

    async fn handle(&self, _query: ListClientsQuery) -> Result<Vec<Client>, DomainError> {
        self.clients.list().await
    }
}
