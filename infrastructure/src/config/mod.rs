//! Configuration file loading for twentyq
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./twentyq.toml` or `./.twentyq.toml`
//! 3. Global: `$XDG_CONFIG_HOME/twentyq/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileAnswersConfig, FileConfig, FileDatasetConfig, FileGameConfig, FileLogConfig,
    FileOutputConfig,
};
pub use loader::ConfigLoader;
