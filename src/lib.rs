//! Client Gallery - Photo gallery delivery and client ratings
//!
//! This crate implements the core of a client-gallery service: clients,
//! slug-addressed galleries with a draft/published/archived lifecycle,
//! ordered images and per-client star ratings, all driven through a
//! type-keyed command bus and query bus.
//!
//! # Example
//!
//! ```no_run
//! use client_gallery::adapters::Repositories;
//! use client_gallery::application::{Application, CreateGalleryCommand};
//! use client_gallery::domain::foundation::CommandMetadata;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let app = Application::new(Repositories::in_memory())?;
//! let gallery = app
//!     .commands()
//!     .execute(
//!         CreateGalleryCommand::new("Summer Wedding", None, 1, None)?,
//!         CommandMetadata::new("photographer"),
//!     )
//!     .await?;
//! println!("{}", gallery.slug());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
