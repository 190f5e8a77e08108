//! Theme and Colors
//!
//! The gallery palette: warm tabby tones for accents, a soft red for
//! favourite markers, and muted grays for help text.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Palette
// ============================================================================

/// Tabby orange (titles, highlighted breed)
pub const TABBY_ORANGE: Color = Color::Rgb(230, 150, 70);

/// Cream (carousel caption)
pub const CREAM: Color = Color::Rgb(245, 230, 200);

/// Favourite heart
pub const FAVORITE_RED: Color = Color::Rgb(255, 95, 110);

/// Link blue (image urls)
pub const LINK_BLUE: Color = Color::Rgb(120, 170, 255);

/// System/dim text
pub const DIM_GRAY: Color = Color::Rgb(110, 110, 110);

// ============================================================================
// Styles
// ============================================================================

/// Pane title
pub fn title() -> Style {
    Style::default()
        .fg(TABBY_ORANGE)
        .add_modifier(Modifier::BOLD)
}

/// Highlighted row in the breed selector
pub fn highlight() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(TABBY_ORANGE)
        .add_modifier(Modifier::BOLD)
}

/// Help and status text
pub fn dim() -> Style {
    Style::default().fg(DIM_GRAY)
}
