//! UpdateClientHandler - Command handler for editing client details.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::application::bus::{Command, CommandHandler};
use crate::application::handlers::lookup::require_client;
use crate::domain::client::{Client, ClientDetails};
use crate::domain::foundation::{ClientId, CommandMetadata, DomainError, ErrorCode, ValidationError};
use crate::ports::ClientRepository;

/// Command to replace a client's details.
#[derive(Debug, Clone)]
pub struct UpdateClientCommand {
    pub client_id: ClientId,
    pub details: ClientDetails,
}

impl UpdateClientCommand {
    pub fn new(
        client_id: i64,
        name: &str,
        email: &str,
        phone: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            client_id: ClientId::new(client_id)?,
            details: ClientDetails::new(name, email, phone, notes)?,
        })
    }
}

impl Command for UpdateClientCommand {
    type Output = Client;
}

/// Handler for updating clients.
pub struct UpdateClientHandler {
    clients: Arc<dyn ClientRepository>,
}

impl UpdateClientHandler {
    pub fn new(clients: Arc<dyn ClientRepository>) -> Self {
        Self { clients }
    }
}

#[async_trait]
impl CommandHandler for UpdateClientHandler {
    type Command = UpdateClientCommand;

    async fn handle(
        &self,
        cmd: UpdateClientCommand,
        metadata: CommandMetadata,
    ) -> Result<Client, DomainError> {
        let mut client = require_client(self.clients.as_ref(), cmd.client_id).await?;

        if let Some(other) = self.clients.find_by_email(&cmd.details.email).await? {
            if other.id() != client.id() {
                return Err(DomainError::new(
                    ErrorCode::Conflict,
                    format!("A client with email {} already exists", cmd.details.email),
                )
                .with_detail("email", cmd.details.email.as_str()));
            }
        }

        client.update(cmd.details);
        self.clients.update(&client).await?;

        info!(client_id = %client.id(), actor = %metadata.actor, "Client updated");
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryClientRepository;

    async fn setup() -> (UpdateClientHandler, Arc<InMemoryClientRepository>) {
        let clients = Arc::new(InMemoryClientRepository::new());
        clients
            .create(&ClientDetails::new("Anna", "anna@example.com", None, None).unwrap())
            .await
            .unwrap();
        clients
            .create(&ClientDetails::new("Ben", "ben@example.com", None, None).unwrap())
            .await
            .unwrap();
        (UpdateClientHandler::new(clients.clone()), clients)
    }

    #[tokio::test]
    async fn updates_details() {
        let (handler, clients) = setup().await;
        let cmd =
            UpdateClientCommand::new(1, "Anna Meyer", "anna@example.com", None, Some("VIP")).unwrap();

        let client = handler.handle(cmd, CommandMetadata::test_fixture()).await.unwrap();

        assert_eq!(client.name(), "Anna Meyer");
        let stored = clients.find_by_id(client.id()).await.unwrap().unwrap();
        assert_eq!(stored.notes(), Some("VIP"));
    }

    #[tokio::test]
    async fn email_of_another_client_is_a_conflict() {
        let (handler, _) = setup().await;
        let cmd = UpdateClientCommand::new(1, "Anna", "ben@example.com", None, None).unwrap();

        let err = handler
            .handle(cmd, CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn unknown_client_is_not_found() {
        let (handler, _) = setup().await;
        let cmd = UpdateClientCommand::new(99, "Nobody", "no@example.com", None, None).unwrap();

        let err = handler
            .handle(cmd, CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ClientNotFound);
    }

    #[test]
    fn command_rejects_non_positive_id() {
        assert!(UpdateClientCommand::new(0, "Anna", "anna@example.com", None, None).is_err());
    }
}
