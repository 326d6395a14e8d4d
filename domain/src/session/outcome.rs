//! Session results

use crate::core::entity::Entity;
use crate::core::question::QuestionKey;
use serde::{Deserialize, Serialize};

/// The final guess of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "entity", rename_all = "snake_case")]
pub enum Guess {
    Entity(Entity),
    /// The answers ruled out every candidate. Defensive: every issued
    /// question leaves a candidate on both sides, so play never reaches it.
    NoGuessPossible,
}

impl Guess {
    pub fn entity(&self) -> Option<&Entity> {
        match self {
            Guess::Entity(entity) => Some(entity),
            Guess::NoGuessPossible => None,
        }
    }
}

impl std::fmt::Display for Guess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Guess::Entity(entity) => write!(f, "{}", entity),
            Guess::NoGuessPossible => write!(f, "no guess possible"),
        }
    }
}

/// Why a session stopped asking questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Exactly one candidate is left
    SingleCandidate,
    /// The turn cap was reached
    TurnLimit,
    /// Neither attributes nor predicates can split the candidates
    QuestionsExhausted,
    /// The answers contradicted every candidate. Defensive, like
    /// [`Guess::NoGuessPossible`].
    EmptyCandidateSet,
}

impl EndReason {
    pub fn as_str(&self) -> &str {
        match self {
            EndReason::SingleCandidate => "single_candidate",
            EndReason::TurnLimit => "turn_limit",
            EndReason::QuestionsExhausted => "questions_exhausted",
            EndReason::EmptyCandidateSet => "empty_candidate_set",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            EndReason::SingleCandidate => "Narrowed to a single candidate",
            EndReason::TurnLimit => "Question limit reached",
            EndReason::QuestionsExhausted => "No more discriminating questions",
            EndReason::EmptyCandidateSet => "No candidate matches the answers",
        }
    }
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One answered turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// 1-based turn number
    pub turn: usize,
    pub key: QuestionKey,
    pub prompt: String,
    pub answer: bool,
    /// Candidates left after applying the answer
    pub remaining: usize,
}

/// Result of a finished session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub guess: Guess,
    pub reason: EndReason,
    /// Number of answered questions
    pub turns: usize,
    /// Attributes and predicates asked, in order
    pub asked: Vec<QuestionKey>,
    /// Candidates still consistent with the answers, sorted
    pub remaining: Vec<Entity>,
    pub transcript: Vec<TurnRecord>,
}

impl SessionOutcome {
    pub fn is_exact(&self) -> bool {
        self.remaining.len() == 1
    }
}
