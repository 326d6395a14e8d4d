//! Application layer for twentyq
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{AnswerTokens, GameParams};
pub use ports::{
    presenter::{Presenter, PresenterError, ScriptedPresenter},
    session_logger::{MemorySessionLogger, NoSessionLogger, SessionEvent, SessionLogger},
};
pub use use_cases::answer_reader::AnswerReader;
pub use use_cases::play_game::{
    CandidateScope, PlayGameError, PlayGameInput, PlayGameOutput, PlayGameUseCase,
};
pub use use_cases::select_category::{
    CategorySelection, SelectCategoryError, SelectCategoryUseCase,
};
