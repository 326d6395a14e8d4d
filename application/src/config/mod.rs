//! Application-level configuration.
//!
//! - [`GameParams`]: session loop control (turn cap, timeouts, display)
//! - [`AnswerTokens`]: replies accepted as yes or no

pub mod answer_tokens;
pub mod game_params;

pub use answer_tokens::AnswerTokens;
pub use game_params::GameParams;
