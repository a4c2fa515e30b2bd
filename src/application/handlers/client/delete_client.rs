//! DeleteClientHandler - Command handler for removing a client.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::application::bus::{Command, CommandHandler};
use crate::application::handlers::lookup::require_client;
use crate::domain::foundation::{ClientId, CommandMetadata, DomainError, ErrorCode, ValidationError};
use crate::ports::{ClientRepository, GalleryRepository};

/// Command to delete a client that owns no galleries.
#[derive(Debug, Clone, Copy)]
pub struct DeleteClientCommand {
    pub client_id: ClientId,
}

impl DeleteClientCommand {
    pub fn new(client_id: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            client_id: ClientId::new(client_id)?,
        })
    }
}

impl Command for DeleteClientCommand {
    type Output = ();
}

/// Handler for deleting clients.
pub struct DeleteClientHandler {
    clients: Arc<dyn ClientRepository>,
    galleries: Arc<dyn GalleryRepository>,
}

impl DeleteClientHandler {
    pub fn new(clients: Arc<dyn ClientRepository>, galleries: Arc<dyn GalleryRepository>) -> Self {
        Self { clients, galleries }
    }
}

#[async_trait]
impl CommandHandler for DeleteClientHandler {
    type Command = DeleteClientCommand;

    async fn handle(
        &self,
        cmd: DeleteClientCommand,
        metadata: CommandMetadata,
    ) -> Result<(), DomainError> {
        let client = require_client(self.clients.as_ref(), cmd.client_id).await?;

        let owned = self.galleries.count_by_client(client.id()).await?;
        if owned > 0 {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("Client {} still has {} galleries", client.id(), owned),
            )
            .with_detail("galleries", owned.to_string()));
        }

        self.clients.delete(client.id()).await?;

        info!(client_id = %client.id(), actor = %metadata.actor, "Client deleted");
        Ok(())
    }
}
