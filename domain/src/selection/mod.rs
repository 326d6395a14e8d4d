//! Question selection over dataset attributes.

pub mod selector;

pub use selector::QuestionSelector;
