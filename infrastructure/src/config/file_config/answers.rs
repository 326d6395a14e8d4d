//! Answer token configuration from TOML (`[answers]` section)

use serde::{Deserialize, Serialize};
use twentyq_application::AnswerTokens;

/// Raw answer tokens from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnswersConfig {
    pub yes: Vec<String>,
    pub no: Vec<String>,
}

impl Default for FileAnswersConfig {
    fn default() -> Self {
        let tokens = AnswerTokens::default();
        Self {
            yes: tokens.yes,
            no: tokens.no,
        }
    }
}

impl FileAnswersConfig {
    pub fn to_tokens(&self) -> AnswerTokens {
        AnswerTokens::new(self.yes.iter().cloned(), self.no.iter().cloned())
    }
}
