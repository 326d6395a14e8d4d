//! Configuration issues.
//!
//! Settings are checked after all sources are merged. Each problem is
//! reported as a [`ConfigIssue`] with a severity, so callers can print
//! warnings and refuse to start on errors.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the game cannot be played with this configuration.
    Error,
    /// Non-fatal: the game works but may not behave as expected.
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// `max_turns = 0`: the session guesses without asking anything.
    ZeroTurnLimit,
    /// `max_turns` above 19: more than twenty questions including the guess.
    TurnLimitAboveTwenty,
    /// `secondary_min_fraction` outside `[0, 0.5]`.
    SecondaryFractionOutOfRange,
    /// A yes or no token list is empty.
    EmptyAnswerTokens,
    /// The same token means both yes and no.
    OverlappingAnswerTokens,
    /// `answer_timeout_seconds = 0` times out every prompt.
    ZeroAnswerTimeout,
}

/// A detected issue in the merged configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    /// Check whether any issues are errors (i.e. fatal).
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_errors() {
        let warning = ConfigIssue::warning(ConfigIssueCode::TurnLimitAboveTwenty, "long game");
        assert!(!ConfigIssue::has_errors(std::slice::from_ref(&warning)));

        let error = ConfigIssue::error(ConfigIssueCode::ZeroTurnLimit, "no turns");
        assert!(ConfigIssue::has_errors(&[warning, error]));
    }

    #[test]
    fn test_display() {
        let issue = ConfigIssue::error(ConfigIssueCode::EmptyAnswerTokens, "no yes tokens");
        assert_eq!(issue.to_string(), "error: no yes tokens");
    }
}
