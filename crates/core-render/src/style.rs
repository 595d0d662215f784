//! Colour id to terminal colour mapping.
//!
//! Group colours are small integers assigned at load time; this is the only
//! place they become concrete terminal colours. Ids outside the palette fall
//! back to the default foreground.

use core_document::ColorId;
use crossterm::style::Color;

pub fn border_color() -> Color {
    Color::DarkGrey
}

/// Foreground for `id`, or `None` for the terminal default.
pub fn foreground(id: ColorId) -> Option<Color> {
    match id.0 {
        1 => Some(border_color()),
        2 => Some(Color::Blue),
        3 => Some(Color::Cyan),
        4 => Some(Color::Green),
        5 => Some(Color::Magenta),
        6 => Some(Color::Red),
        7 => Some(Color::Yellow),
        _ => None,
    }
}
