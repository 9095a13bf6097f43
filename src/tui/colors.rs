//! Color constants for the terminal user interface.

use ratatui::style::Color;

// Synthwave palette for the Vice City look

/// Title, highlights and the electric input border
pub const NEON_PINK: Color = Color::Rgb(255, 46, 151);
/// Subtitle and accents
pub const NEON_CYAN: Color = Color::Rgb(125, 249, 255);
/// Completed missions and particles
pub const SUNSET_PURPLE: Color = Color::Rgb(148, 87, 235);
/// Stats values
pub const SUNSET_ORANGE: Color = Color::Rgb(255, 153, 51);
/// Background of the status bar
pub const NIGHT_BLUE: Color = Color::Rgb(20, 12, 48);
