//! Domain layer for twentyq
//!
//! This crate contains the game logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Attribute game
//!
//! An [`AttributeStore`] records, for every candidate entity, boolean and
//! scalar attribute values. Each turn the [`QuestionSelector`] scores every
//! unused attribute with the [`SplitEvaluator`] and asks the question that
//! splits the remaining candidates most evenly.
//!
//! ## Fallback
//!
//! When no attribute splits the candidates any more, the
//! [`FallbackStrategy`] asks name-pattern questions ("Does the word contain
//! the letter R?") from a [`PredicateCatalog`].
//!
//! ## Session
//!
//! A [`GameSession`] ties these together as a state machine and ends with a
//! [`SessionOutcome`]. A [`CategoryTree`] can narrow the universe to one
//! category first.

pub mod attribute;
pub mod config;
pub mod core;
pub mod fallback;
pub mod prefilter;
pub mod selection;
pub mod session;
pub mod split;
pub mod store;

// Re-export commonly used types
pub use attribute::{Attribute, AttributeKind, AttributeValue, RawRating};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    entity::Entity,
    error::DomainError,
    question::{AskedSet, Question, QuestionKey},
};
pub use fallback::{
    CatalogTier, DEFAULT_SECONDARY_MIN_FRACTION, FallbackStrategy, NamePredicate, NameTest,
    PredicateCatalog,
};
pub use prefilter::{CategoryNode, CategoryTree, CategoryWalker, WalkStep};
pub use selection::QuestionSelector;
pub use session::{
    DEFAULT_MAX_TURNS, EndReason, GameSession, Guess, SessionOutcome, SessionState, TurnRecord,
};
pub use split::{Split, SplitEvaluator, SplitOutcome};
pub use store::{AttributeStore, EntityRecord};
