//! Whiskers TUI - Terminal breed gallery
//!
//! This crate provides a full-screen terminal surface for the whiskers
//! Conductor: a breed selector, an auto-advancing image carousel, and an
//! info panel.
//!
//! # Architecture
//!
//! - **App**: Event loop, key handling, and pane rendering
//! - **ConductorClient**: Embedded Conductor, one task per surface event
//! - **Display**: State derived from `GalleryMessage`s
//! - **Widgets**: Borderless wrapped text blocks

pub mod app;
pub mod conductor_client;
pub mod display;
pub mod theme;
pub mod widgets;

pub use app::App;
