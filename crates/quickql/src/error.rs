//! Error types for quickql

use crate::keyword::Flag;
use thiserror::Error;

/// Result type alias for builder operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised by builder mutators.
///
/// Every variant is an invocation error raised at the call site; rendering
/// never fails. Semantically invalid SQL fragment content is never an error
/// here; that is the downstream engine's concern.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Empty or blank clause keyword passed to `add`
    #[error("Clause keyword cannot be empty")]
    EmptyClauseKeyword,

    /// A flag token the clause does not accept
    #[error("Unsupported flag '{flag}' for {clause}")]
    UnsupportedFlag { clause: String, flag: String },

    /// A different flag is already set on the clause
    #[error("Flag already set to '{current}', cannot set '{requested}'")]
    FlagConflict { current: Flag, requested: Flag },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl QueryError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is a flag conflict error
    pub fn is_flag_conflict(&self) -> bool {
        matches!(self, Self::FlagConflict { .. })
    }
}
