//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// The dataset cannot back an [`AttributeStore`](crate::store::AttributeStore).
    ///
    /// Raised at load time, before any session starts.
    #[error("Dataset inconsistency at '{entity}' / '{attribute}': {reason}")]
    DatasetInconsistency {
        entity: String,
        attribute: String,
        reason: String,
    },

    #[error("No candidates to play with")]
    EmptyUniverse,

    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    #[error("Cannot {action} while the session is {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    #[error("Category walk already ended at '{0}'")]
    CategoryWalkFinished(String),
}

impl DomainError {
    pub(crate) fn inconsistency(
        entity: impl Into<String>,
        attribute: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        DomainError::DatasetInconsistency {
            entity: entity.into(),
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error was raised while building the attribute store
    pub fn is_dataset_error(&self) -> bool {
        matches!(self, DomainError::DatasetInconsistency { .. })
    }
}
