//! Scanner Error Types
//!
//! The three failures a scan attempt can end in carry distinct operator
//! messages. They must never be collapsed into one generic error.

use thiserror::Error;

use crate::core::error_handling::ContextualError;
use crate::parser::ParseError;
use crate::repository::error::RepositoryError;
use crate::scanner::controller::ScanState;

pub const PARSE_FAILURE_MESSAGE: &str = "Could not read the license disk. Please try scanning again.";
pub const DUPLICATE_DECLINED_MESSAGE: &str = "Scan cancelled: this vehicle has already been scanned.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScanError {
    /// No license number could be extracted from the capture
    #[error("Could not read the license disk ({reason})")]
    ParseFailure { reason: ParseError },

    /// The operator declined to save a duplicate
    #[error("Scan of {license_number} cancelled after {matches} earlier scan(s) were found")]
    DuplicateDeclined {
        license_number: String,
        matches: usize,
    },

    /// The repository rejected the write; the attempt is abandoned
    #[error("Failed to save scan: {source}")]
    Persistence {
        #[source]
        source: RepositoryError,
    },

    #[error("Cannot {operation} while the scanner is {state}")]
    InvalidState {
        operation: &'static str,
        state: ScanState,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Internal scanner error: {message}")]
    Internal { message: String },
}

impl ScanError {
    pub fn internal(message: String) -> Self {
        ScanError::Internal { message }
    }

    /// Whether the operator can usefully try again
    pub fn is_retryable(&self) -> bool {
        match self {
            ScanError::ParseFailure { .. } => true,
            ScanError::Persistence { source } => source.is_retryable(),
            _ => false,
        }
    }
}

impl ContextualError for ScanError {
    fn is_user_actionable(&self) -> bool {
        match self {
            ScanError::ParseFailure { .. }
            | ScanError::DuplicateDeclined { .. }
            | ScanError::Persistence { .. } => true,
            ScanError::Repository(err) => err.is_user_actionable(),
            ScanError::InvalidState { .. } | ScanError::Internal { .. } => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ScanError::ParseFailure { .. } => Some(PARSE_FAILURE_MESSAGE),
            ScanError::DuplicateDeclined { .. } => Some(DUPLICATE_DECLINED_MESSAGE),
            // Surfaced verbatim
            ScanError::Persistence { source } => Some(&source.message),
            ScanError::Repository(err) => err.user_message(),
            ScanError::InvalidState { .. } | ScanError::Internal { .. } => None,
        }
    }
}

pub type ScanResult<T> = Result<T, ScanError>;
