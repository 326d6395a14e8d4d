//! Game parameters: session loop control.
//!
//! [`GameParams`] groups the static parameters that control
//! [`PlayGameUseCase`](crate::use_cases::play_game::PlayGameUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use twentyq_domain::{
    ConfigIssue, ConfigIssueCode, DEFAULT_MAX_TURNS, DEFAULT_SECONDARY_MIN_FRACTION,
};

/// Session loop control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameParams {
    /// Maximum number of answered questions before guessing.
    pub max_turns: usize,
    /// How long to wait for each answer; `None` waits forever.
    pub answer_timeout: Option<Duration>,
    /// Minimum smaller-side share for secondary-catalog predicates.
    pub secondary_min_fraction: f64,
    /// List remaining candidates once at most this many are left.
    pub show_remaining_below: usize,
    /// Ask "Are you thinking of X?" after the guess.
    pub confirm_guess: bool,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
            answer_timeout: None,
            secondary_min_fraction: DEFAULT_SECONDARY_MIN_FRACTION,
            show_remaining_below: 10,
            confirm_guess: true,
        }
    }
}

impl GameParams {
    // ==================== Builder Methods ====================

    pub fn with_max_turns(mut self, max: usize) -> Self {
        self.max_turns = max;
        self
    }

    pub fn with_answer_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.answer_timeout = timeout;
        self
    }

    pub fn with_secondary_min_fraction(mut self, fraction: f64) -> Self {
        self.secondary_min_fraction = fraction;
        self
    }

    pub fn with_show_remaining_below(mut self, count: usize) -> Self {
        self.show_remaining_below = count;
        self
    }

    pub fn with_confirm_guess(mut self, confirm: bool) -> Self {
        self.confirm_guess = confirm;
        self
    }

    /// Check parameter values.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.max_turns == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTurnLimit,
                "max_turns is 0: the game would guess without asking anything",
            ));
        } else if self.max_turns > DEFAULT_MAX_TURNS {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::TurnLimitAboveTwenty,
                format!(
                    "max_turns is {}: more than twenty questions including the guess",
                    self.max_turns
                ),
            ));
        }

        if !(0.0..=0.5).contains(&self.secondary_min_fraction) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::SecondaryFractionOutOfRange,
                format!(
                    "secondary_min_fraction {} is outside [0, 0.5]",
                    self.secondary_min_fraction
                ),
            ));
        }

        if self.answer_timeout == Some(Duration::ZERO) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroAnswerTimeout,
                "answer_timeout_seconds is 0: every prompt would time out",
            ));
        }

        issues
    }
}
