//! Dataset ingestion errors

use std::path::PathBuf;
use thiserror::Error;
use twentyq_domain::DomainError;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Line {line}: invalid JSON: {message}")]
    InvalidJson { line: usize, message: String },

    #[error("Line {line}: missing field '{field}'")]
    MissingField { line: usize, field: &'static str },

    #[error("Line {line}: {message}")]
    InvalidRecord { line: usize, message: String },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl DatasetError {
    /// Line number the error points at, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            DatasetError::InvalidJson { line, .. }
            | DatasetError::MissingField { line, .. }
            | DatasetError::InvalidRecord { line, .. } => Some(*line),
            _ => None,
        }
    }
}
