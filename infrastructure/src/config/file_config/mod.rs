//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod answers;
mod dataset;
mod game;
mod output;

pub use answers::FileAnswersConfig;
pub use dataset::FileDatasetConfig;
pub use game::FileGameConfig;
pub use output::{FileLogConfig, FileOutputConfig};

use serde::{Deserialize, Serialize};
use twentyq_domain::ConfigIssue;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Session loop settings
    pub game: FileGameConfig,
    /// Accepted yes/no replies
    pub answers: FileAnswersConfig,
    /// Dataset, category tree and catalog locations
    pub dataset: FileDatasetConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Session log settings
    pub log: FileLogConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.game.to_game_params().validate();
        issues.extend(self.answers.to_tokens().validate());
        issues
    }
}
