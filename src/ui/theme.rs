//! UI theme constants - Minimalist dark theme

use ratatui::style::{Color, Modifier, Style};

// Base colors - muted grays
pub const COLOR_DIM: Color = Color::Rgb(80, 80, 80); // Very dim gray for borders, disabled
pub const COLOR_MUTED: Color = Color::Rgb(120, 120, 120); // Muted gray for labels
pub const COLOR_TEXT: Color = Color::Rgb(180, 180, 180); // Normal text
pub const COLOR_BRIGHT: Color = Color::Rgb(220, 220, 220); // Bright text for emphasis

// Accent colors - used sparingly
pub const COLOR_ACCENT: Color = Color::Rgb(100, 180, 220); // Cyan-ish for keys, focus
pub const COLOR_SUCCESS: Color = Color::Rgb(100, 180, 100); // Green for selected options

// Semantic aliases
pub const COLOR_BORDER: Color = COLOR_SUCCESS;
pub const COLOR_LABEL: Color = COLOR_MUTED;
pub const COLOR_VALUE: Color = COLOR_TEXT;
pub const COLOR_DISABLED: Color = COLOR_DIM;
pub const COLOR_FOCUS: Color = COLOR_ACCENT;

pub const STYLE_LABEL: Style = Style::new().fg(COLOR_LABEL);
pub const STYLE_VALUE: Style = Style::new().fg(COLOR_VALUE);
pub const STYLE_MUTED: Style = Style::new().fg(COLOR_MUTED);
pub const STYLE_BRIGHT: Style = Style::new().fg(COLOR_BRIGHT);
pub const STYLE_DISABLED: Style = Style::new().fg(COLOR_DISABLED);
pub const STYLE_KEY: Style = Style::new().fg(COLOR_ACCENT);

/// Title of popup blocks
pub fn style_title() -> Style {
    Style::new().fg(COLOR_BRIGHT).add_modifier(Modifier::BOLD)
}

/// Focused control
pub fn style_focus() -> Style {
    Style::new().fg(COLOR_FOCUS).add_modifier(Modifier::BOLD)
}

/// Text cursor inside a focused edit box
pub fn style_cursor() -> Style {
    Style::new().fg(COLOR_BRIGHT).add_modifier(Modifier::REVERSED)
}

// Control symbols
pub const SYMBOL_FOCUS: &str = "▶ ";
pub const SYMBOL_NO_FOCUS: &str = "  ";
pub const SYMBOL_RADIO_ON: &str = "(•)";
pub const SYMBOL_RADIO_OFF: &str = "( )";
pub const SYMBOL_CHECK_ON: &str = "[x]";
pub const SYMBOL_CHECK_OFF: &str = "[ ]";
pub const SYMBOL_LIST_PREV: &str = "‹ ";
pub const SYMBOL_LIST_NEXT: &str = " ›";
