//! Game session domain.
//!
//! - [`entities::GameSession`]: one game, driven as a state machine
//! - [`outcome::SessionOutcome`]: what a finished game produced

pub mod entities;
pub mod outcome;

pub use entities::{DEFAULT_MAX_TURNS, GameSession, SessionState};
pub use outcome::{EndReason, Guess, SessionOutcome, TurnRecord};
