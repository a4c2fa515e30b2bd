//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers
//! (read) and routes both through type-keyed buses.

pub mod bus;
pub mod container;
pub mod handlers;

pub use bus::{BusError, Command, CommandBus, CommandHandler, Query, QueryBus, QueryHandler};
pub use container::Application;
pub use handlers::*;
