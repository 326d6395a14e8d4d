//! Game session state machine
//!
//! ```text
//! Selecting ──question──▶ AwaitingAnswer ──answer──▶ Filtering ──▶ Selecting
//!     │                                                  │
//!     └──────── nothing to ask / ≤ 1 candidate ──────────┴──▶ Terminal
//! ```
//!
//! The session is driven from outside: [`GameSession::advance`] runs the
//! internal transitions until input is needed or the game is over, and
//! [`GameSession::submit_answer`] feeds the player's answer in.

use super::outcome::{EndReason, Guess, SessionOutcome, TurnRecord};
use crate::core::entity::Entity;
use crate::core::error::DomainError;
use crate::core::question::{AskedSet, Question, QuestionKey};
use crate::fallback::FallbackStrategy;
use crate::selection::QuestionSelector;
use crate::store::AttributeStore;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Default cap on answered questions; the guess itself is the twentieth.
pub const DEFAULT_MAX_TURNS: usize = 19;

/// State of a [`GameSession`]
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Selecting,
    AwaitingAnswer(Question),
    Filtering { question: Question, answer: bool },
    /// Absorbing: no further questions are issued
    Terminal(SessionOutcome),
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Selecting => "selecting",
            SessionState::AwaitingAnswer(_) => "awaiting_answer",
            SessionState::Filtering { .. } => "filtering",
            SessionState::Terminal(_) => "terminal",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Terminal(_))
    }
}

/// One game of twenty questions over a shared, read-only store (Entity)
#[derive(Debug)]
pub struct GameSession {
    store: Arc<AttributeStore>,
    fallback: FallbackStrategy,
    max_turns: usize,
    candidates: BTreeSet<Entity>,
    asked: AskedSet,
    asked_order: Vec<QuestionKey>,
    turn_count: usize,
    transcript: Vec<TurnRecord>,
    state: SessionState,
}

impl GameSession {
    /// Start a session over `candidates`, usually supplied by the category
    /// pre-filter.
    ///
    /// Every candidate must be known to the store.
    pub fn new(
        store: Arc<AttributeStore>,
        candidates: BTreeSet<Entity>,
        fallback: FallbackStrategy,
    ) -> Result<Self, DomainError> {
        if candidates.is_empty() {
            return Err(DomainError::EmptyUniverse);
        }
        if let Some(unknown) = candidates.iter().find(|e| !store.contains(e)) {
            return Err(DomainError::UnknownEntity(unknown.to_string()));
        }

        Ok(Self {
            store,
            fallback,
            max_turns: DEFAULT_MAX_TURNS,
            candidates,
            asked: AskedSet::new(),
            asked_order: Vec::new(),
            turn_count: 0,
            transcript: Vec::new(),
            state: SessionState::Selecting,
        })
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn candidates(&self) -> &BTreeSet<Entity> {
        &self.candidates
    }

    pub fn asked(&self) -> &AskedSet {
        &self.asked
    }

    pub fn turn_count(&self) -> usize {
        self.turn_count
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    pub fn transcript(&self) -> &[TurnRecord] {
        &self.transcript
    }

    /// The outcome, once the session is terminal
    pub fn outcome(&self) -> Option<&SessionOutcome> {
        match &self.state {
            SessionState::Terminal(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Run internal transitions until the session awaits an answer or ends.
    pub fn advance(&mut self) -> &SessionState {
        loop {
            match std::mem::replace(&mut self.state, SessionState::Selecting) {
                SessionState::Selecting => self.state = self.select(),
                SessionState::Filtering { question, answer } => {
                    self.state = self.filter(question, answer)
                }
                settled => {
                    self.state = settled;
                    return &self.state;
                }
            }
        }
    }

    /// Feed the answer to the pending question.
    ///
    /// Moves `AwaitingAnswer` to `Filtering`; call [`advance`](Self::advance)
    /// to apply it.
    pub fn submit_answer(&mut self, answer: bool) -> Result<(), DomainError> {
        match std::mem::replace(&mut self.state, SessionState::Selecting) {
            SessionState::AwaitingAnswer(question) => {
                self.state = SessionState::Filtering { question, answer };
                Ok(())
            }
            other => {
                let state = other.as_str();
                self.state = other;
                Err(DomainError::InvalidTransition {
                    action: "submit an answer",
                    state,
                })
            }
        }
    }

    fn select(&self) -> SessionState {
        if self.candidates.len() <= 1 {
            return self.terminal(None);
        }
        if self.turn_count >= self.max_turns {
            return self.terminal(Some(EndReason::TurnLimit));
        }

        let question = QuestionSelector::new(&self.store)
            .select(&self.candidates, &self.asked)
            .or_else(|| self.fallback.select_predicate(&self.candidates, &self.asked));

        match question {
            Some(question) => SessionState::AwaitingAnswer(question),
            None => self.terminal(Some(EndReason::QuestionsExhausted)),
        }
    }

    fn filter(&mut self, question: Question, answer: bool) -> SessionState {
        let store = &self.store;
        self.candidates
            .retain(|entity| question.accepts(store, entity) == answer);

        let key = question.key();
        self.asked.insert(key.clone());
        self.asked_order.push(key.clone());
        self.turn_count += 1;
        self.transcript.push(TurnRecord {
            turn: self.turn_count,
            key,
            prompt: question.prompt_text(),
            answer,
            remaining: self.candidates.len(),
        });

        if self.candidates.len() <= 1 {
            self.terminal(None)
        } else if self.turn_count >= self.max_turns {
            self.terminal(Some(EndReason::TurnLimit))
        } else {
            SessionState::Selecting
        }
    }

    /// Build the terminal state; a candidate count of 0 or 1 decides the
    /// reason on its own. A count of 0 is unreachable through `submit_answer`.
    fn terminal(&self, reason: Option<EndReason>) -> SessionState {
        let reason = match self.candidates.len() {
            0 => EndReason::EmptyCandidateSet,
            1 => EndReason::SingleCandidate,
            _ => reason.unwrap_or(EndReason::QuestionsExhausted),
        };
        let guess = self
            .candidates
            .first()
            .cloned()
            .map_or(Guess::NoGuessPossible, Guess::Entity);

        SessionState::Terminal(SessionOutcome {
            guess,
            reason,
            turns: self.turn_count,
            asked: self.asked_order.clone(),
            remaining: self.candidates.iter().cloned().collect(),
            transcript: self.transcript.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{AttributeKind, RawRating};
    use crate::fallback::{NamePredicate, NameTest, PredicateCatalog};
    use crate::store::EntityRecord;
    use std::collections::BTreeMap;

    fn no_fallback() -> FallbackStrategy {
        FallbackStrategy::new(PredicateCatalog::empty())
    }

    fn cat_dog_store() -> Arc<AttributeStore> {
        let kinds = BTreeMap::from([("fast".to_string(), AttributeKind::Boolean)]);
        Arc::new(
            AttributeStore::build(
                vec![
                    EntityRecord::new("cat").with_rating("fast", RawRating::Number(0.0)),
                    EntityRecord::new("dog").with_rating("fast", RawRating::Number(1.0)),
                ],
                &kinds,
            )
            .unwrap(),
        )
    }

    fn size_store(values: &[(&str, f64)]) -> Arc<AttributeStore> {
        let kinds = BTreeMap::from([("size".to_string(), AttributeKind::Scalar)]);
        let records = values
            .iter()
            .map(|(n, v)| EntityRecord::new(*n).with_rating("size", RawRating::Number(*v)));
        Arc::new(AttributeStore::build(records, &kinds).unwrap())
    }

    fn pending(session: &mut GameSession) -> Question {
        match session.advance() {
            SessionState::AwaitingAnswer(q) => q.clone(),
            other => panic!("expected a question, got {:?}", other),
        }
    }

    fn finish(session: &mut GameSession) -> SessionOutcome {
        match session.advance() {
            SessionState::Terminal(outcome) => outcome.clone(),
            other => panic!("expected terminal, got {:?}", other),
        }
    }

    #[test]
    fn test_cat_dog_yes_guesses_dog() {
        let store = cat_dog_store();
        let universe = store.entity_set();
        let mut session = GameSession::new(store, universe, no_fallback()).unwrap();

        let question = pending(&mut session);
        assert_eq!(
            question,
            Question::Boolean {
                attribute: "fast".into()
            }
        );
        session.submit_answer(true).unwrap();

        let outcome = finish(&mut session);
        assert_eq!(outcome.guess, Guess::Entity(Entity::new("dog")));
        assert_eq!(outcome.reason, EndReason::SingleCandidate);
        assert_eq!(outcome.turns, 1);
        assert_eq!(outcome.asked, vec![QuestionKey::Attribute("fast".into())]);
        assert_eq!(outcome.transcript[0].remaining, 1);
    }

    #[test]
    fn test_single_candidate_is_terminal_immediately() {
        let store = cat_dog_store();
        let only_cat = BTreeSet::from([Entity::new("cat")]);
        let mut session = GameSession::new(store, only_cat, no_fallback()).unwrap();
        let outcome = finish(&mut session);
        assert_eq!(outcome.guess, Guess::Entity(Entity::new("cat")));
        assert_eq!(outcome.turns, 0);
    }

    #[test]
    fn test_scalar_first_question_bisects() {
        let store = size_store(&[("a", 2.0), ("b", 4.0), ("c", 6.0), ("d", 8.0), ("e", 10.0)]);
        let universe = store.entity_set();
        let mut session = GameSession::new(store, universe, no_fallback()).unwrap();
        let question = pending(&mut session);
        assert_eq!(
            question.prompt_text(),
            "Is its size greater than the size of a c?"
        );
        session.submit_answer(false).unwrap();
        session.advance();
        assert_eq!(session.candidates().len(), 3);
    }

    #[test]
    fn test_uniform_attribute_falls_through_to_terminal() {
        let store = size_store(&[("b", 3.0), ("a", 3.0), ("c", 3.0)]);
        let universe = store.entity_set();
        let mut session = GameSession::new(store, universe, no_fallback()).unwrap();
        let outcome = finish(&mut session);
        assert_eq!(outcome.reason, EndReason::QuestionsExhausted);
        assert_eq!(outcome.guess, Guess::Entity(Entity::new("a")));
        assert_eq!(outcome.remaining.len(), 3);
    }

    #[test]
    fn test_predicate_question_after_attribute_questions() {
        let kinds = BTreeMap::from([("fast".to_string(), AttributeKind::Boolean)]);
        let store = Arc::new(
            AttributeStore::build(
                vec![
                    EntityRecord::new("cat").with_rating("fast", RawRating::Flag(false)),
                    EntityRecord::new("cow").with_rating("fast", RawRating::Flag(false)),
                    EntityRecord::new("dog").with_rating("fast", RawRating::Flag(true)),
                    EntityRecord::new("doe").with_rating("fast", RawRating::Flag(true)),
                ],
                &kinds,
            )
            .unwrap(),
        );
        let universe = store.entity_set();
        let fallback = FallbackStrategy::new(PredicateCatalog {
            primary: vec![NamePredicate::new(
                "ends_e",
                "Does it end with E?",
                NameTest::ends_with("e"),
            )],
            secondary: vec![],
        });
        let mut session = GameSession::new(store, universe, fallback).unwrap();

        pending(&mut session);
        session.submit_answer(true).unwrap();
        let question = pending(&mut session);
        assert_eq!(question.key(), QuestionKey::Predicate("ends_e".into()));
        session.submit_answer(true).unwrap();

        let outcome = finish(&mut session);
        assert_eq!(outcome.guess, Guess::Entity(Entity::new("doe")));
        assert_eq!(outcome.turns, 2);
    }

    #[test]
    fn test_missing_value_survives_no_answer() {
        let kinds = BTreeMap::from([("fast".to_string(), AttributeKind::Boolean)]);
        let store = Arc::new(
            AttributeStore::build(
                vec![
                    EntityRecord::new("cat").with_rating("fast", RawRating::Flag(false)),
                    EntityRecord::new("dog").with_rating("fast", RawRating::Flag(true)),
                    EntityRecord::new("ghost"),
                ],
                &kinds,
            )
            .unwrap(),
        );
        let universe = store.entity_set();
        let mut session = GameSession::new(store, universe, no_fallback()).unwrap();
        pending(&mut session);
        session.submit_answer(false).unwrap();
        let outcome = finish(&mut session);
        assert_eq!(
            outcome.remaining,
            vec![Entity::new("cat"), Entity::new("ghost")]
        );
    }

    #[test]
    fn test_turn_limit_ends_session() {
        let store = size_store(&[("a", 1.0), ("b", 2.0), ("c", 3.0), ("d", 4.0)]);
        let universe = store.entity_set();
        let mut session = GameSession::new(store, universe, no_fallback())
            .unwrap()
            .with_max_turns(0);
        let outcome = finish(&mut session);
        assert_eq!(outcome.reason, EndReason::TurnLimit);
        assert_eq!(outcome.guess, Guess::Entity(Entity::new("a")));
    }

    #[test]
    fn test_terminal_is_absorbing() {
        let store = cat_dog_store();
        let only_dog = BTreeSet::from([Entity::new("dog")]);
        let mut session = GameSession::new(store, only_dog, no_fallback()).unwrap();
        let first = finish(&mut session);
        let second = finish(&mut session);
        assert_eq!(first, second);
        assert!(session.submit_answer(true).is_err());
        assert!(session.state().is_terminal());
    }

    #[test]
    fn test_answer_without_question_is_rejected() {
        let store = cat_dog_store();
        let universe = store.entity_set();
        let mut session = GameSession::new(store, universe, no_fallback()).unwrap();
        let err = session.submit_answer(true).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidTransition {
                action: "submit an answer",
                state: "selecting"
            }
        );
        assert_eq!(session.state(), &SessionState::Selecting);
    }

    #[test]
    fn test_empty_universe_is_rejected() {
        let store = cat_dog_store();
        let err = GameSession::new(store, BTreeSet::new(), no_fallback()).unwrap_err();
        assert_eq!(err, DomainError::EmptyUniverse);
    }

    #[test]
    fn test_unknown_candidate_is_rejected() {
        let store = cat_dog_store();
        let err = GameSession::new(store, BTreeSet::from([Entity::new("yeti")]), no_fallback())
            .unwrap_err();
        assert_eq!(err, DomainError::UnknownEntity("yeti".into()));
    }
}
