//! Command bus and query bus.
//!
//! Each bus is a flat map from message type to exactly one handler. There is
//! no middleware, no retry and no queue: `execute` looks the handler up,
//! awaits it, and hands its result back unchanged.
//!
//! Dispatch is keyed by `TypeId`, but every call site stays statically
//! typed: `execute::<C>` can only ever reach a handler whose associated
//! `Command` type is `C`.
//!
//! # Example
//!
//! ```ignore
//! let mut commands = CommandBus::new();
//! commands.register(CreateGalleryHandler::new(clients, galleries))?;
//!
//! let gallery = commands
//!     .execute(CreateGalleryCommand::new("Summer Wedding", None, 7, None)?, metadata)
//!     .await?;
//! ```

use async_trait::async_trait;
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::foundation::{CommandMetadata, DomainError};

/// A request to change state. Validated when constructed.
pub trait Command: Send + 'static {
    type Output: Send + 'static;
}

/// A request to read state. Same dispatch mechanism, no mutation.
pub trait Query: Send + 'static {
    type Output: Send + 'static;
}

/// Carries out one command type.
#[async_trait]
pub trait CommandHandler: Send + Sync + 'static {
    type Command: Command;

    async fn handle(
        &self,
        cmd: Self::Command,
        metadata: CommandMetadata,
    ) -> Result<<Self::Command as Command>::Output, DomainError>;
}

/// Answers one query type.
#[async_trait]
pub trait QueryHandler: Send + Sync + 'static {
    type Query: Query;

    async fn handle(
        &self,
        query: Self::Query,
    ) -> Result<<Self::Query as Query>::Output, DomainError>;
}

/// Errors raised by the buses themselves, plus pass-through handler errors.
#[derive(Debug, Clone, Error)]
pub enum BusError {
    /// Wiring bug: nothing was registered for this message type.
    #[error("No handler registered for {message_type}")]
    UnregisteredHandler { message_type: &'static str },

    /// Startup configuration error: a second handler for the same type.
    #[error("A handler is already registered for {message_type}")]
    DuplicateHandler { message_type: &'static str },

    #[error(transparent)]
    Handler(#[from] DomainError),
}

impl BusError {
    /// Returns the handler's domain error, if that is what this is.
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            BusError::Handler(err) => Some(err),
            _ => None,
        }
    }
}

/// Type-indexed handler storage shared by both buses.
#[derive(Default)]
struct HandlerMap {
    inner: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl HandlerMap {
    fn insert<M: 'static, H: Any + Send + Sync>(&mut self, handler: H) -> Result<(), BusError> {
        let type_id = TypeId::of::<M>();
        if self.inner.contains_key(&type_id) {
            return Err(BusError::DuplicateHandler {
                message_type: type_name::<M>(),
            });
        }
        self.inner.insert(type_id, Box::new(handler));
        Ok(())
    }

    fn get<M: 'static, H: Any>(&self) -> Result<&H, BusError> {
        self.inner
            .get(&TypeId::of::<M>())
            .and_then(|boxed| boxed.downcast_ref::<H>())
            .ok_or(BusError::UnregisteredHandler {
                message_type: type_name::<M>(),
            })
    }

    fn contains<M: 'static>(&self) -> bool {
        self.inner.contains_key(&TypeId::of::<M>())
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

type BoxedCommandHandler<C> = Arc<dyn CommandHandler<Command = C>>;
type BoxedQueryHandler<Q> = Arc<dyn QueryHandler<Query = Q>>;

/// Dispatches commands to their single registered handler.
#[derive(Default)]
pub struct CommandBus {
    handlers: HandlerMap,
}

impl CommandBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for `H::Command`.
    ///
    /// # Errors
    ///
    /// - `DuplicateHandler` if that command type already has a handler
    pub fn register<H: CommandHandler>(&mut self, handler: H) -> Result<(), BusError> {
        let handler: BoxedCommandHandler<H::Command> = Arc::new(handler);
        self.handlers.insert::<H::Command, _>(handler)
    }

    /// Execute a command through its registered handler.
    ///
    /// # Errors
    ///
    /// - `UnregisteredHandler` if no handler exists for `C`
    /// - `Handler` wrapping whatever the handler returned
    pub async fn execute<C: Command>(
        &self,
        cmd: C,
        metadata: CommandMetadata,
    ) -> Result<C::Output, BusError> {
        let message_type = type_name::<C>();
        let handler = self.handlers.get::<C, BoxedCommandHandler<C>>()?;

        debug!(
            message_type,
            actor = %metadata.actor,
            correlation_id = metadata.correlation_id_opt().unwrap_or("-"),
            "Dispatching command"
        );

        handler.handle(cmd, metadata).await.map_err(|err| {
            warn!(message_type, code = %err.code, error = %err.message, "Command failed");
            BusError::Handler(err)
        })
    }

    pub fn is_registered<C: Command>(&self) -> bool {
        self.handlers.contains::<C>()
    }

    /// Number of registered command types.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Dispatches queries to their single registered handler.
#[derive(Default)]
pub struct QueryBus {
    handlers: HandlerMap,
}

impl QueryBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for `H::Query`.
    ///
    /// # Errors
    ///
    /// - `DuplicateHandler` if that query type already has a handler
    pub fn register<H: QueryHandler>(&mut self, handler: H) -> Result<(), BusError> {
        let handler: BoxedQueryHandler<H::Query> = Arc::new(handler);
        self.handlers.insert::<H::Query, _>(handler)
    }

    /// Execute a query through its registered handler.
    pub async fn execute<Q: Query>(&self, query: Q) -> Result<Q::Output, BusError> {
        let message_type = type_name::<Q>();
        let handler = self.handlers.get::<Q, BoxedQueryHandler<Q>>()?;

        debug!(message_type, "Dispatching query");

        handler.handle(query).await.map_err(|err| {
            debug!(message_type, code = %err.code, error = %err.message, "Query failed");
            BusError::Handler(err)
        })
    }

    pub fn is_registered<Q: Query>(&self) -> bool {
        self.handlers.contains::<Q>()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
