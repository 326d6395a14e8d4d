//! Accepted answer tokens.

use serde::{Deserialize, Serialize};
use twentyq_domain::{ConfigIssue, ConfigIssueCode};

/// Replies that count as yes or no.
///
/// Matching trims whitespace and ignores ASCII case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerTokens {
    pub yes: Vec<String>,
    pub no: Vec<String>,
}

impl Default for AnswerTokens {
    fn default() -> Self {
        Self {
            yes: vec!["1".into(), "y".into(), "yes".into()],
            no: vec!["0".into(), "n".into(), "no".into()],
        }
    }
}

impl AnswerTokens {
    pub fn new<Y, N, S>(yes: Y, no: N) -> Self
    where
        Y: IntoIterator<Item = S>,
        N: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            yes: yes.into_iter().map(Into::into).collect(),
            no: no.into_iter().map(Into::into).collect(),
        }
    }

    /// `Some(true)` for a yes token, `Some(false)` for a no token, `None`
    /// for anything else.
    pub fn parse(&self, reply: &str) -> Option<bool> {
        let reply = reply.trim();
        if self.yes.iter().any(|t| t.trim().eq_ignore_ascii_case(reply)) {
            Some(true)
        } else if self.no.iter().any(|t| t.trim().eq_ignore_ascii_case(reply)) {
            Some(false)
        } else {
            None
        }
    }

    /// Short description of the accepted replies, e.g. `1/y/yes or 0/n/no`
    pub fn hint(&self) -> String {
        format!("{} or {}", self.yes.join("/"), self.no.join("/"))
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (side, tokens) in [("yes", &self.yes), ("no", &self.no)] {
            if tokens.iter().all(|t| t.trim().is_empty()) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyAnswerTokens,
                    format!("no {} tokens configured", side),
                ));
            }
        }

        let overlapping: Vec<&str> = self
            .yes
            .iter()
            .filter(|y| self.no.iter().any(|n| n.trim().eq_ignore_ascii_case(y.trim())))
            .map(String::as_str)
            .collect();
        if !overlapping.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OverlappingAnswerTokens,
                format!("tokens mean both yes and no: {}", overlapping.join(", ")),
            ));
        }

        issues
    }
}
