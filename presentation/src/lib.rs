//! Presentation layer for twentyq
//!
//! This crate contains CLI definitions, the console presenter,
//! and output formatters.

pub mod cli;
pub mod game;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{
    CheckArgs, Cli, Command, ConvertArgs, DatasetLayout, OnDuplicate, OutputFormat, PlayArgs,
    ReportArgs,
};
pub use game::presenter::ConsolePresenter;
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use output::set_color_enabled;
