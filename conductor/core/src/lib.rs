//! Whiskers Core - Headless Cat Breed Gallery
//!
//! This crate keeps a breed gallery consistent with TheCatAPI: it loads the
//! breed list, fills an image carousel for the selected breed, shows breed
//! details, toggles favourites, and switches the carousel to the user's
//! favourites. It is independent of any UI framework and can drive a TUI or
//! run headless for testing.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        UI Surfaces                              │
//! │        ┌─────────────┐              ┌──────────────────┐        │
//! │        │     TUI     │              │     Headless     │        │
//! │        │  (ratatui)  │              │     (tests)      │        │
//! │        └──────┬──────┘              └────────┬─────────┘        │
//! │               └──────────────┬───────────────┘                  │
//! │                      SurfaceEvent (up)                          │
//! │                     GalleryMessage (down)                       │
//! └──────────────────────────────┼──────────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┼──────────────────────────────────┐
//! │                        WHISKERS CORE                            │
//! │  ┌───────────────────────────┴───────────────────────────────┐  │
//! │  │                        Conductor                          │  │
//! │  │   breed load · image reload · favourite toggle · view     │  │
//! │  └───────────────────────────┬───────────────────────────────┘  │
//! │                      CatalogApi (trait)                         │
//! │          ┌───────────────────┴───────────────────┐              │
//! │   ┌──────┴───────┐                       ┌───────┴────────┐     │
//! │   │ CatApiClient │                       │ InMemoryCatalog│     │
//! │   │  (reqwest)   │                       │    (tests)     │     │
//! │   └──────────────┘                       └────────────────┘     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Conductor`]: The synchronization flow
//! - [`GalleryMessage`]: Messages sent from Conductor to surfaces
//! - [`SurfaceEvent`]: Events sent from surfaces to Conductor
//! - [`CatalogApi`]: The remote catalog abstraction
//! - [`CatalogError`]: Failures of a single catalog call
//!
//! # Quick Start
//!
//! ```ignore
//! use whiskers_core::{load_config, CatApiClient, Conductor, SurfaceEvent};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = load_config()?;
//!     let client = CatApiClient::new(&config.api)?;
//!
//!     let (tx, mut rx) = mpsc::channel(100);
//!     let conductor = Conductor::new(client, config.flow.clone(), tx);
//!
//!     conductor.start().await;
//!     conductor
//!         .handle_event(SurfaceEvent::FavouritesRequested)
//!         .await;
//!
//!     while let Ok(msg) = rx.try_recv() {
//!         // Render message
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`api`]: Catalog abstraction, HTTP client, and in-memory catalog
//! - [`config`]: TOML and environment configuration
//! - [`conductor`]: The synchronization flow
//! - [`error`]: Catalog error types
//! - [`events`]: Events from surfaces to Conductor
//! - [`messages`]: Messages from Conductor to surfaces
//! - [`models`]: Catalog records and presentation projections
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod conductor;
pub mod config;
pub mod error;
pub mod events;
pub mod messages;
pub mod models;

// Re-exports for convenience
pub use api::{decode_array, CatApiClient, CatalogApi, Decoded, InMemoryCatalog, RemoteRecord};
pub use conductor::{Conductor, FavoriteToggle, FavouritesOutcome, ReloadOutcome};
pub use error::{CatalogError, ElementSkipped, Endpoint};
pub use events::SurfaceEvent;
pub use messages::{FlowState, GalleryMessage, Generation};
pub use models::{
    Breed, BreedImage, BreedOption, CarouselItem, Favorite, FavoriteImage, InfoPanel,
};

// Config exports
pub use config::{
    default_config_path, default_log_path, load_config, load_config_from_path, ApiConfig, ConfigError,
    ConfigSource, FlowConfig, SurfaceConfig, WhiskersConfig, WhiskersToml,
};
