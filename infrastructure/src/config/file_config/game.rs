//! Game configuration from TOML (`[game]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;
use twentyq_application::GameParams;

/// Raw game configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGameConfig {
    /// Questions answered before the guess
    pub max_turns: usize,
    /// Seconds to wait for each answer (unset waits forever)
    pub answer_timeout_seconds: Option<u64>,
    /// Minimum smaller-side share for secondary predicates
    pub secondary_min_fraction: f64,
    /// List remaining candidates at or below this count
    pub show_remaining_below: usize,
    /// Ask the player to confirm the final guess
    pub confirm_guess: bool,
}

impl Default for FileGameConfig {
    fn default() -> Self {
        let params = GameParams::default();
        Self {
            max_turns: params.max_turns,
            answer_timeout_seconds: None,
            secondary_min_fraction: params.secondary_min_fraction,
            show_remaining_below: params.show_remaining_below,
            confirm_guess: params.confirm_guess,
        }
    }
}

impl FileGameConfig {
    pub fn to_game_params(&self) -> GameParams {
        GameParams::default()
            .with_max_turns(self.max_turns)
            .with_answer_timeout(self.answer_timeout_seconds.map(Duration::from_secs))
            .with_secondary_min_fraction(self.secondary_min_fraction)
            .with_show_remaining_below(self.show_remaining_below)
            .with_confirm_guess(self.confirm_guess)
    }
}
