//! Split scoring for attribute-based questions.

pub mod evaluator;

pub use evaluator::{Split, SplitEvaluator, SplitOutcome};
