//! Select Category use case.
//!
//! Walks a [`CategoryTree`] with the player before the attribute game, so
//! the game starts from one category instead of the whole universe.

use crate::config::AnswerTokens;
use crate::ports::presenter::{Presenter, PresenterError};
use crate::ports::session_logger::{NoSessionLogger, SessionEvent, SessionLogger};
use crate::use_cases::answer_reader::AnswerReader;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;
use twentyq_domain::{CategoryTree, CategoryWalker, DomainError, WalkStep};

/// Errors that can occur during category selection.
#[derive(Error, Debug)]
pub enum SelectCategoryError {
    #[error("Presenter error: {0}")]
    Presenter(#[from] PresenterError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// The category the walk ended in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySelection {
    pub label: String,
    /// Options listed for the label in the tree file
    pub option_count: usize,
    /// Questions answered to get there
    pub questions: usize,
}

/// Use case for choosing a category.
pub struct SelectCategoryUseCase {
    tree: Arc<CategoryTree>,
    tokens: AnswerTokens,
    answer_timeout: Option<Duration>,
    session_logger: Arc<dyn SessionLogger>,
}

impl SelectCategoryUseCase {
    pub fn new(tree: Arc<CategoryTree>) -> Self {
        Self {
            tree,
            tokens: AnswerTokens::default(),
            answer_timeout: None,
            session_logger: Arc::new(NoSessionLogger),
        }
    }

    pub fn with_tokens(mut self, tokens: AnswerTokens) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn with_answer_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.answer_timeout = timeout;
        self
    }

    pub fn with_session_logger(mut self, logger: Arc<dyn SessionLogger>) -> Self {
        self.session_logger = logger;
        self
    }

    pub async fn execute(
        &self,
        presenter: &dyn Presenter,
    ) -> Result<CategorySelection, SelectCategoryError> {
        let reader = AnswerReader::new(presenter, &self.tokens)
            .with_timeout(self.answer_timeout)
            .with_logger(self.session_logger.as_ref());
        let mut walker = CategoryWalker::new(&self.tree);

        let label = loop {
            match walker.current() {
                WalkStep::Selected(label) => break label,
                WalkStep::Ask(text) => {
                    let answer = reader.ask_yes_no(text).await?;
                    walker.answer(answer)?;
                }
            }
        };

        let selection = CategorySelection {
            label: label.to_string(),
            option_count: self.tree.option_count(label),
            questions: walker.depth(),
        };
        info!(
            "Category selected: {} ({} listed options)",
            selection.label, selection.option_count
        );
        self.session_logger.log(SessionEvent::new(
            "category_selected",
            serde_json::json!({
                "label": selection.label,
                "option_count": selection.option_count,
                "questions": selection.questions,
            }),
        ));

        Ok(selection)
    }
}
