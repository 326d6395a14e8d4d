//! Presenter port: the player-facing boundary of a game.
//!
//! The game talks to the player only through [`Presenter`]: it shows text
//! and asks for a raw reply. Interpreting the reply as yes/no is done by
//! [`AnswerReader`](crate::use_cases::answer_reader::AnswerReader), so
//! adapters stay dumb.
//!
//! # Implementations
//!
//! - **Console (CLI)**: `ConsolePresenter` in the presentation layer
//! - **Scripted**: [`ScriptedPresenter`], replays canned replies

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use thiserror::Error;

/// Error type for presenter operations.
///
/// These are failures of the boundary itself, not player answers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresenterError {
    /// Player cancelled the game (e.g., via Ctrl+C).
    #[error("Operation cancelled")]
    Cancelled,

    /// Input/output error (e.g., terminal read failure).
    #[error("I/O error: {0}")]
    IoError(String),

    /// No more input will arrive (EOF or script exhausted).
    #[error("Input closed before the game finished")]
    InputClosed,
}

/// Port for showing text to the player and reading replies.
#[async_trait]
pub trait Presenter: Send + Sync {
    /// Show `prompt` and wait for one raw reply line.
    async fn ask(&self, prompt: &str) -> Result<String, PresenterError>;

    /// Show informational text.
    fn show(&self, text: &str);
}

/// Presenter that replays a fixed list of replies.
///
/// Used for non-interactive play and tests. Everything shown and asked is
/// recorded. Once the replies run out, [`ask`](Presenter::ask) fails with
/// [`PresenterError::InputClosed`].
#[derive(Debug, Default)]
pub struct ScriptedPresenter {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
    shown: Mutex<Vec<String>>,
}

impl ScriptedPresenter {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
            shown: Mutex::new(Vec::new()),
        }
    }

    /// Prompts passed to `ask`, in order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Text passed to `show`, in order
    pub fn shown(&self) -> Vec<String> {
        self.shown.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Replies not yet consumed
    pub fn remaining(&self) -> usize {
        self.replies.lock().map(|r| r.len()).unwrap_or_default()
    }
}

#[async_trait]
impl Presenter for ScriptedPresenter {
    async fn ask(&self, prompt: &str) -> Result<String, PresenterError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        let mut replies = self
            .replies
            .lock()
            .map_err(|e| PresenterError::IoError(e.to_string()))?;
        replies.pop_front().ok_or(PresenterError::InputClosed)
    }

    fn show(&self, text: &str) {
        if let Ok(mut shown) = self.shown.lock() {
            shown.push(text.to_string());
        }
    }
}
