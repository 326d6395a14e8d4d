//! Play Game use case.
//!
//! Runs one game of twenty questions against a [`Presenter`]:
//! 1. Resolve the starting candidates (all, one category, or explicit)
//! 2. Drive the [`GameSession`] state machine, one answer per turn
//! 3. Report the guess and optionally ask the player to confirm it

use crate::config::{AnswerTokens, GameParams};
use crate::ports::presenter::{Presenter, PresenterError};
use crate::ports::session_logger::{NoSessionLogger, SessionEvent, SessionLogger};
use crate::use_cases::answer_reader::AnswerReader;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use twentyq_domain::{
    AttributeStore, DomainError, Entity, FallbackStrategy, GameSession, Guess, PredicateCatalog,
    SessionOutcome, SessionState,
};

/// Errors that can occur while playing.
#[derive(Error, Debug)]
pub enum PlayGameError {
    #[error("Presenter error: {0}")]
    Presenter(#[from] PresenterError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Which entities the game starts from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CandidateScope {
    /// Every entity in the store
    #[default]
    All,
    /// Entities whose category label matches
    Category(String),
    Entities(BTreeSet<Entity>),
}

/// Input for the [`PlayGameUseCase`].
#[derive(Debug, Clone, Default)]
pub struct PlayGameInput {
    pub scope: CandidateScope,
}

impl PlayGameInput {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn category(label: impl Into<String>) -> Self {
        Self {
            scope: CandidateScope::Category(label.into()),
        }
    }

    pub fn entities(entities: BTreeSet<Entity>) -> Self {
        Self {
            scope: CandidateScope::Entities(entities),
        }
    }
}

/// Output of the [`PlayGameUseCase`].
#[derive(Debug, Clone)]
pub struct PlayGameOutput {
    pub outcome: SessionOutcome,
    /// The player's reply to "Are you thinking of X?", when asked
    pub confirmed: Option<bool>,
}

/// Use case for playing one game.
pub struct PlayGameUseCase {
    store: Arc<AttributeStore>,
    catalog: PredicateCatalog,
    params: GameParams,
    tokens: AnswerTokens,
    session_logger: Arc<dyn SessionLogger>,
}

impl Clone for PlayGameUseCase {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            catalog: self.catalog.clone(),
            params: self.params.clone(),
            tokens: self.tokens.clone(),
            session_logger: self.session_logger.clone(),
        }
    }
}

impl PlayGameUseCase {
    pub fn new(store: Arc<AttributeStore>, catalog: PredicateCatalog) -> Self {
        Self {
            store,
            catalog,
            params: GameParams::default(),
            tokens: AnswerTokens::default(),
            session_logger: Arc::new(NoSessionLogger),
        }
    }

    pub fn with_params(mut self, params: GameParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_tokens(mut self, tokens: AnswerTokens) -> Self {
        self.tokens = tokens;
        self
    }

    /// Create with a session logger.
    pub fn with_session_logger(mut self, logger: Arc<dyn SessionLogger>) -> Self {
        self.session_logger = logger;
        self
    }

    pub fn params(&self) -> &GameParams {
        &self.params
    }

    fn resolve(&self, scope: CandidateScope) -> BTreeSet<Entity> {
        match scope {
            CandidateScope::All => self.store.entity_set(),
            CandidateScope::Category(label) => self.store.entities_in_category(&label),
            CandidateScope::Entities(entities) => entities,
        }
    }

    /// Play one game to the end.
    pub async fn execute(
        &self,
        input: PlayGameInput,
        presenter: &dyn Presenter,
    ) -> Result<PlayGameOutput, PlayGameError> {
        let candidates = self.resolve(input.scope);
        info!(
            "Starting game: {} candidates, {} attributes",
            candidates.len(),
            self.store.all_attributes().len()
        );

        let fallback = FallbackStrategy::new(self.catalog.clone())
            .with_secondary_min_fraction(self.params.secondary_min_fraction);
        let mut session = GameSession::new(self.store.clone(), candidates, fallback)?
            .with_max_turns(self.params.max_turns);

        self.session_logger.log(SessionEvent::new(
            "session_started",
            serde_json::json!({
                "candidates": session.candidates().len(),
                "attributes": self.store.all_attributes().len(),
                "max_turns": self.params.max_turns,
            }),
        ));

        let reader = AnswerReader::new(presenter, &self.tokens)
            .with_timeout(self.params.answer_timeout)
            .with_logger(self.session_logger.as_ref());

        presenter.show(&format!(
            "Think of one of {} things. Answer {}.",
            session.candidates().len(),
            self.tokens.hint()
        ));

        let outcome = loop {
            let question = match session.advance() {
                SessionState::AwaitingAnswer(question) => question.clone(),
                SessionState::Terminal(outcome) => break outcome.clone(),
                other => {
                    return Err(DomainError::InvalidTransition {
                        action: "ask a question",
                        state: other.as_str(),
                    }
                    .into());
                }
            };

            let turn = session.turn_count() + 1;
            let prompt = question.prompt_text();
            debug!(
                "Turn {}: {} ({}) over {} candidates",
                turn,
                question.key(),
                question.kind_label(),
                session.candidates().len()
            );
            self.session_logger.log(SessionEvent::new(
                "question_asked",
                serde_json::json!({
                    "turn": turn,
                    "key": question.key(),
                    "kind": question.kind_label(),
                    "prompt": prompt,
                }),
            ));

            let answer = reader
                .ask_yes_no(&format!("Q{}: {}", turn, prompt))
                .await?;
            self.session_logger.log(SessionEvent::new(
                "answer_received",
                serde_json::json!({ "turn": turn, "answer": answer }),
            ));

            session.submit_answer(answer)?;
            session.advance();
            self.show_remaining(presenter, session.candidates());
        };

        info!(
            "Game finished after {} turns: {} ({})",
            outcome.turns,
            outcome.guess,
            outcome.reason.as_str()
        );
        self.session_logger.log(SessionEvent::new(
            "session_finished",
            serde_json::json!({
                "guess": outcome.guess,
                "reason": outcome.reason,
                "turns": outcome.turns,
                "remaining": outcome.remaining.len(),
            }),
        ));

        let confirmed = match (&outcome.guess, self.params.confirm_guess) {
            (Guess::Entity(entity), true) => {
                let confirmed = reader
                    .ask_yes_no(&format!("Are you thinking of {}?", entity))
                    .await?;
                if confirmed {
                    presenter.show("Got it!");
                } else if outcome.remaining.len() > 1 {
                    presenter.show(&format!(
                        "Then it is one of: {}",
                        join_names(outcome.remaining.iter().skip(1))
                    ));
                } else {
                    presenter.show("You win, that one is not in my list.");
                }
                Some(confirmed)
            }
            _ => None,
        };

        Ok(PlayGameOutput { outcome, confirmed })
    }

    fn show_remaining(&self, presenter: &dyn Presenter, candidates: &BTreeSet<Entity>) {
        let count = candidates.len();
        presenter.show(&format!("Candidates left: {}", count));
        if count > 0 && count <= self.params.show_remaining_below {
            presenter.show(&format!("  {}", join_names(candidates.iter())));
        }
    }
}

fn join_names<'a>(entities: impl Iterator<Item = &'a Entity>) -> String {
    entities
        .map(Entity::name)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::presenter::ScriptedPresenter;
    use crate::ports::session_logger::MemorySessionLogger;
    use std::collections::BTreeMap;
    use twentyq_domain::{
        AttributeKind, EndReason, EntityRecord, NamePredicate, NameTest, RawRating,
    };

    fn animal_store() -> Arc<AttributeStore> {
        let kinds = BTreeMap::from([
            ("fast".to_string(), AttributeKind::Boolean),
            ("size".to_string(), AttributeKind::Scalar),
        ]);
        let rows = [
            ("cat", false, 3.0, "pets"),
            ("dog", true, 5.0, "pets"),
            ("horse", true, 9.0, "farm"),
            ("mouse", false, 1.0, "pets"),
        ];
        let records = rows.iter().map(|(name, fast, size, category)| {
            EntityRecord::new(*name)
                .with_category(*category)
                .with_rating("fast", RawRating::Flag(*fast))
                .with_rating("size", RawRating::Number(*size))
        });
        Arc::new(AttributeStore::build(records, &kinds).unwrap())
    }

    fn use_case() -> PlayGameUseCase {
        PlayGameUseCase::new(animal_store(), PredicateCatalog::empty())
            .with_params(GameParams::default().with_confirm_guess(false))
    }

    #[tokio::test]
    async fn test_two_answers_find_entity() {
        // fast splits 2/2 first; size > 1 then separates cat from mouse
        let presenter = ScriptedPresenter::new(["n", "y"]);
        let output = use_case()
            .execute(PlayGameInput::all(), &presenter)
            .await
            .unwrap();

        assert_eq!(output.outcome.guess, Guess::Entity(Entity::new("cat")));
        assert_eq!(output.outcome.reason, EndReason::SingleCandidate);
        assert_eq!(output.outcome.turns, 2);
        assert_eq!(output.confirmed, None);
        assert_eq!(
            presenter.prompts(),
            vec![
                "Q1: Is it fast?",
                "Q2: Is its size greater than the size of a mouse?"
            ]
        );
    }

    #[tokio::test]
    async fn test_malformed_answer_does_not_consume_turn() {
        let presenter = ScriptedPresenter::new(["perhaps", "n", "y"]);
        let logger = Arc::new(MemorySessionLogger::new());
        let output = use_case()
            .with_session_logger(logger.clone())
            .execute(PlayGameInput::all(), &presenter)
            .await
            .unwrap();

        assert_eq!(output.outcome.turns, 2);
        assert_eq!(output.outcome.guess, Guess::Entity(Entity::new("cat")));
        assert_eq!(logger.payloads("malformed_answer").len(), 1);
    }

    #[tokio::test]
    async fn test_session_events_in_order() {
        let presenter = ScriptedPresenter::new(["y", "y"]);
        let logger = Arc::new(MemorySessionLogger::new());
        use_case()
            .with_session_logger(logger.clone())
            .execute(PlayGameInput::all(), &presenter)
            .await
            .unwrap();

        assert_eq!(
            logger.event_types(),
            vec![
                "session_started",
                "question_asked",
                "answer_received",
                "question_asked",
                "answer_received",
                "session_finished"
            ]
        );
        let finished = &logger.payloads("session_finished")[0];
        assert_eq!(finished["reason"], "single_candidate");
        assert_eq!(finished["guess"]["entity"], "horse");
    }

    #[tokio::test]
    async fn test_category_scope() {
        let presenter = ScriptedPresenter::new(Vec::<String>::new());
        let output = use_case()
            .execute(PlayGameInput::category("farm"), &presenter)
            .await
            .unwrap();
        assert_eq!(output.outcome.guess, Guess::Entity(Entity::new("horse")));
        assert_eq!(output.outcome.turns, 0);
        assert!(presenter.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_empty_category_is_error() {
        let presenter = ScriptedPresenter::new(["y"]);
        let err = use_case()
            .execute(PlayGameInput::category("ocean"), &presenter)
            .await
            .unwrap_err();
        assert!(matches!(err, PlayGameError::Domain(DomainError::EmptyUniverse)));
        assert!(presenter.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_script_exhausted_is_presenter_error() {
        let presenter = ScriptedPresenter::new(["y"]);
        let err = use_case()
            .execute(PlayGameInput::all(), &presenter)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PlayGameError::Presenter(PresenterError::InputClosed)
        ));
    }

    #[tokio::test]
    async fn test_confirmation_is_not_a_turn() {
        let presenter = ScriptedPresenter::new(["y", "n", "yes"]);
        let output = PlayGameUseCase::new(animal_store(), PredicateCatalog::empty())
            .execute(PlayGameInput::all(), &presenter)
            .await
            .unwrap();
        assert_eq!(output.outcome.turns, 2);
        assert_eq!(output.outcome.guess, Guess::Entity(Entity::new("dog")));
        assert_eq!(output.confirmed, Some(true));
        assert_eq!(
            presenter.prompts().last().map(String::as_str),
            Some("Are you thinking of dog?")
        );
        assert!(presenter.shown().iter().any(|line| line == "Got it!"));
    }

    #[tokio::test]
    async fn test_remaining_candidates_listed() {
        let presenter = ScriptedPresenter::new(["y", "n"]);
        use_case()
            .execute(PlayGameInput::all(), &presenter)
            .await
            .unwrap();
        let shown = presenter.shown();
        assert!(shown.contains(&"Candidates left: 2".to_string()));
        assert!(shown.contains(&"  dog, horse".to_string()));
    }

    #[tokio::test]
    async fn test_turn_limit_from_params() {
        let presenter = ScriptedPresenter::new(["n"]);
        let output = use_case()
            .with_params(GameParams::default().with_max_turns(1).with_confirm_guess(false))
            .execute(PlayGameInput::all(), &presenter)
            .await
            .unwrap();
        assert_eq!(output.outcome.reason, EndReason::TurnLimit);
        assert_eq!(output.outcome.guess, Guess::Entity(Entity::new("cat")));
        assert_eq!(output.outcome.remaining.len(), 2);
    }

    #[tokio::test]
    async fn test_fallback_predicates_asked() {
        let catalog = PredicateCatalog {
            primary: vec![NamePredicate::new(
                "starts_m",
                "Does it start with M?",
                NameTest::starts_with("m"),
            )],
            secondary: vec![],
        };
        let kinds = BTreeMap::from([("fast".to_string(), AttributeKind::Boolean)]);
        let store = Arc::new(
            AttributeStore::build(
                ["cat", "mouse"]
                    .iter()
                    .map(|n| EntityRecord::new(*n).with_rating("fast", RawRating::Flag(false))),
                &kinds,
            )
            .unwrap(),
        );
        let presenter = ScriptedPresenter::new(["y"]);
        let output = PlayGameUseCase::new(store, catalog)
            .with_params(GameParams::default().with_confirm_guess(false))
            .execute(PlayGameInput::all(), &presenter)
            .await
            .unwrap();
        assert_eq!(output.outcome.guess, Guess::Entity(Entity::new("mouse")));
        assert_eq!(presenter.prompts(), vec!["Q1: Does it start with M?"]);
    }
}
