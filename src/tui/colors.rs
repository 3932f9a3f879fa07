//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// Pending status badge
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Completed status badge
pub const DARK_GREEN: Color = Color::Rgb(0, 80, 0);
/// Error region and confirmation dialog
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
/// Header and status bar
pub const DARK_PURPLE: Color = Color::Rgb(86, 60, 92);
/// Border of an input carrying the attention cue
pub const CUE_RED: Color = Color::Rgb(220, 50, 47);
