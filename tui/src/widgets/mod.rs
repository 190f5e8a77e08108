//! Widgets
//!
//! Small rendering helpers shared by the gallery panes.

mod text_block;

pub use text_block::{fit_width, TextBlock};
