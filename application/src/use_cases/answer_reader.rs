//! Yes/no answer reading on top of a [`Presenter`].
//!
//! Malformed replies and timeouts re-prompt; they never reach the session.

use crate::config::AnswerTokens;
use crate::ports::presenter::{Presenter, PresenterError};
use crate::ports::session_logger::{NoSessionLogger, SessionEvent, SessionLogger};
use std::time::Duration;
use tracing::debug;

/// Asks a prompt until the player gives a recognised yes/no reply.
pub struct AnswerReader<'a> {
    presenter: &'a dyn Presenter,
    tokens: &'a AnswerTokens,
    timeout: Option<Duration>,
    logger: &'a dyn SessionLogger,
}

impl<'a> AnswerReader<'a> {
    pub fn new(presenter: &'a dyn Presenter, tokens: &'a AnswerTokens) -> Self {
        Self {
            presenter,
            tokens,
            timeout: None,
            logger: &NoSessionLogger,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_logger(mut self, logger: &'a dyn SessionLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Ask `prompt` until a yes or no token arrives.
    ///
    /// Only presenter failures end the loop early.
    pub async fn ask_yes_no(&self, prompt: &str) -> Result<bool, PresenterError> {
        loop {
            let reply = match self.timeout {
                Some(limit) => match tokio::time::timeout(limit, self.presenter.ask(prompt)).await
                {
                    Ok(reply) => reply?,
                    Err(_) => {
                        debug!("No answer within {:?}", limit);
                        self.logger.log(SessionEvent::new(
                            "malformed_answer",
                            serde_json::json!({
                                "prompt": prompt,
                                "timed_out": true,
                            }),
                        ));
                        self.presenter
                            .show(&format!("No answer received. {}", self.retry_hint()));
                        continue;
                    }
                },
                None => self.presenter.ask(prompt).await?,
            };

            if let Some(answer) = self.tokens.parse(&reply) {
                return Ok(answer);
            }

            debug!("Malformed answer: {:?}", reply);
            self.logger.log(SessionEvent::new(
                "malformed_answer",
                serde_json::json!({
                    "prompt": prompt,
                    "reply": reply,
                }),
            ));
            self.presenter
                .show(&format!("Sorry, I didn't get that. {}", self.retry_hint()));
        }
    }

    fn retry_hint(&self) -> String {
        format!("Please answer {}.", self.tokens.hint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::presenter::ScriptedPresenter;
    use crate::ports::session_logger::MemorySessionLogger;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_reprompts_on_malformed() {
        let presenter = ScriptedPresenter::new(["maybe", "", "Y"]);
        let tokens = AnswerTokens::default();
        let logger = MemorySessionLogger::new();
        let reader = AnswerReader::new(&presenter, &tokens).with_logger(&logger);

        assert!(reader.ask_yes_no("Is it red?").await.unwrap());
        assert_eq!(presenter.prompts().len(), 3);
        assert_eq!(presenter.shown().len(), 2);
        assert_eq!(logger.payloads("malformed_answer").len(), 2);
    }

    #[tokio::test]
    async fn test_presenter_error_propagates() {
        let presenter = ScriptedPresenter::new(["what"]);
        let tokens = AnswerTokens::default();
        let reader = AnswerReader::new(&presenter, &tokens);
        assert_eq!(
            reader.ask_yes_no("Is it red?").await.unwrap_err(),
            PresenterError::InputClosed
        );
    }

    /// Stalls on the first ask, answers "n" afterwards.
    struct StallingPresenter {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Presenter for StallingPresenter {
        async fn ask(&self, _prompt: &str) -> Result<String, PresenterError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            Ok("n".to_string())
        }

        fn show(&self, _text: &str) {}
    }

    #[tokio::test]
    async fn test_timeout_counts_as_malformed() {
        let presenter = StallingPresenter {
            calls: AtomicUsize::new(0),
        };
        let tokens = AnswerTokens::default();
        let logger = MemorySessionLogger::new();
        let reader = AnswerReader::new(&presenter, &tokens)
            .with_timeout(Some(Duration::from_millis(50)))
            .with_logger(&logger);

        assert!(!reader.ask_yes_no("Is it red?").await.unwrap());
        assert_eq!(presenter.calls.load(Ordering::SeqCst), 2);
        let payloads = logger.payloads("malformed_answer");
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0]["timed_out"], true);
    }
}
