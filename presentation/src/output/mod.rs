//! Output formatting for finished games

pub mod console;
pub mod formatter;

/// Force colored output on or off for the whole process
pub fn set_color_enabled(enabled: bool) {
    colored::control::set_override(enabled);
}
