//! Application container - wires every handler onto the buses.

use crate::adapters::Repositories;

use super::bus::{BusError, CommandBus, QueryBus};
use super::handlers::*;

/// Fully wired command and query buses over one set of repositories.
pub struct Application {
    commands: CommandBus,
    queries: QueryBus,
}

impl Application {
    /// Register every handler exactly once.
    ///
    /// # Errors
    ///
    /// - `DuplicateHandler` if two handlers claim the same message type
    pub fn new(repositories: Repositories) -> Result<Self, BusError> {
        let Repositories {
            clients,
            galleries,
            images,
            ratings,
        } = repositories;

        let mut commands = CommandBus::new();
        commands.register(CreateClientHandler::new(clients.clone()))?;
        commands.register(UpdateClientHandler::new(clients.clone()))?;
        commands.register(DeleteClientHandler::new(clients.clone(), galleries.clone()))?;
        commands.register(CreateGalleryHandler::new(clients.clone(), galleries.clone()))?;
        commands.register(UpdateGalleryHandler::new(galleries.clone()))?;
        commands.register(ChangeGalleryStatusHandler::new(galleries.clone()))?;
        commands.register(DeleteGalleryHandler::new(galleries.clone()))?;
        commands.register(AddImageHandler::new(galleries.clone(), images.clone()))?;
        commands.register(RemoveImageHandler::new(galleries.clone(), images.clone()))?;
        commands.register(ReorderImagesHandler::new(galleries.clone(), images.clone()))?;
        commands.register(RateImageHandler::new(
            clients.clone(),
            galleries.clone(),
            images.clone(),
            ratings.clone(),
        ))?;

        let mut queries = QueryBus::new();
        queries.register(GetClientHandler::new(clients.clone()))?;
        queries.register(ListClientsHandler::new(clients))?;
        queries.register(GetGalleryHandler::new(galleries.clone()))?;
        queries.register(GetGalleryBySlugHandler::new(galleries.clone()))?;
        queries.register(ListGalleriesHandler::new(galleries.clone()))?;
        queries.register(ListGalleryImagesHandler::new(galleries, images.clone()))?;
        queries.register(GetImageRatingsHandler::new(images, ratings))?;

        tracing::debug!(
            commands = commands.len(),
            queries = queries.len(),
            "Application wired"
        );

        Ok(Self { commands, queries })
    }

    pub fn commands(&self) -> &CommandBus {
        &self.commands
    }

    pub fn queries(&self) -> &QueryBus {
        &self.queries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_every_message_type() {
        let app = Application::new(Repositories::in_memory()).unwrap();

        assert_eq!(app.commands().len(), 11);
        assert_eq!(app.queries().len(), 7);
        assert!(app.commands().is_registered::<CreateGalleryCommand>());
        assert!(app.commands().is_registered::<RateImageCommand>());
        assert!(app.queries().is_registered::<GetGalleryBySlugQuery>());
        assert!(app.queries().is_registered::<GetImageRatingsQuery>());
    }
}
