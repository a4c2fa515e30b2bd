//! In-memory implementation of ClientRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::AtomicI64;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::next_id;
use crate::domain::client::{Client, ClientDetails, ClientEmail};
use crate::domain::foundation::{ClientId, DomainError, ErrorCode, Timestamp};
use crate::ports::ClientRepository;

/// In-memory client store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClientRepository {
    clients: Arc<RwLock<HashMap<ClientId, Client>>>,
    ids: Arc<AtomicI64>,
}

impl InMemoryClientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.clients.read().await.len()
    }
}

fn email_taken(email: &ClientEmail) -> DomainError {
    DomainError::new(
        ErrorCode::Conflict,
        format!("A client with email {} already exists", email),
    )
    .with_detail("email", email.as_str())
}

fn not_found(id: ClientId) -> DomainError {
    DomainError::new(ErrorCode::ClientNotFound, format!("Client not found: {}", id))
}

#[async_trait]
impl ClientRepository for InMemoryClientRepository {
    async fn create(&self, details: &ClientDetails) -> Result<Client, DomainError> {
        let mut clients = self.clients.write().await;
        if clients.values().any(|c| c.email() == &details.email) {
            return Err(email_taken(&details.email));
        }

        let id = ClientId::new(next_id(&self.ids))?;
        let now = Timestamp::now();
        let client = Client::reconstitute(id, details.clone(), now, now);
        clients.insert(id, client.clone());
        Ok(client)
    }

    async fn update(&self, client: &Client) -> Result<(), DomainError> {
        let mut clients = self.clients.write().await;
        if !clients.contains_key(&client.id()) {
            return Err(not_found(client.id()));
        }
        if clients
            .values()
            .any(|c| c.id() != client.id() && c.email() == client.email())
        {
            return Err(email_taken(client.email()));
        }
        clients.insert(client.id(), client.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, DomainError> {
        Ok(self.clients.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &ClientEmail) -> Result<Option<Client>, DomainError> {
        Ok(self
            .clients
            .read()
            .await
            .values()
            .find(|c| c.email() == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Client>, DomainError> {
        let mut clients: Vec<Client> = self.clients.read().await.values().cloned().collect();
        clients.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(&b.id())));
        Ok(clients)
    }

    async fn delete(&self, id: ClientId) -> Result<(), DomainError> {
        match self.clients.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(not_found(id)),
        }
    }
}
