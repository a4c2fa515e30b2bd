//! CreateClientHandler - Command handler for registering a client.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::application::bus::{Command, CommandHandler};
use crate::domain::client::{Client, ClientDetails};
use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, ValidationError};
use crate::ports::ClientRepository;

/// Command to create a new client.
#[derive(Debug, Clone)]
pub struct CreateClientCommand {
    pub details: ClientDetails,
}

impl CreateClientCommand {
    pub fn new(
        name: &str,
        email: &str,
        phone: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            details: ClientDetails::new(name, email, phone, notes)?,
        })
    }
}

impl Command for CreateClientCommand {
    type Output = Client;
}

/// Handler for creating clients.
pub struct CreateClientHandler {
    clients: Arc<dyn ClientRepository>,
}

impl CreateClientHandler {
    pub fn new(clients: Arc<dyn ClientRepository>) -> Self {
        Self { clients }
    }
}

#[async_trait]
impl CommandHandler for CreateClientHandler {
    type Command = CreateClientCommand;

    async fn handle(
        &self,
        cmd: CreateClientCommand,
        metadata: CommandMetadata,
    ) -> Result<Client, DomainError> {
        if self.clients.find_by_email(&cmd.details.email).await?.is_some() {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("A client with email {} already exists", cmd.details.email),
            )
            .with_detail("email", cmd.details.email.as_str()));
        }

        let client = self.clients.create(&cmd.details).await?;

        info!(client_id = %client.id(), actor = %metadata.actor, "Client created");
        Ok(client)
    }
}
