//! Repository Error Types
//!
//! Every repository failure is a `{code, message}` pair so the front end can
//! show the message verbatim and branch on the code.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use thiserror::Error;

use crate::core::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RepositoryErrorCode {
    NotFound,
    InvalidInput,
    Conflict,
    Unavailable,
    Timeout,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct RepositoryError {
    pub code: RepositoryErrorCode,
    pub message: String,
}

impl RepositoryError {
    pub fn new(code: RepositoryErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(scan_id: &str) -> Self {
        Self::new(
            RepositoryErrorCode::NotFound,
            format!("Scan '{}' not found", scan_id),
        )
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(RepositoryErrorCode::InvalidInput, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(RepositoryErrorCode::Unavailable, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(RepositoryErrorCode::Timeout, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(RepositoryErrorCode::Internal, message)
    }

    /// Whether trying the same operation again may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.code,
            RepositoryErrorCode::Unavailable
                | RepositoryErrorCode::Timeout
                | RepositoryErrorCode::Internal
        )
    }
}

impl From<ValidationError> for RepositoryError {
    fn from(err: ValidationError) -> Self {
        RepositoryError::invalid_input(err.message())
    }
}

impl crate::core::error_handling::ContextualError for RepositoryError {
    fn is_user_actionable(&self) -> bool {
        matches!(
            self.code,
            RepositoryErrorCode::NotFound | RepositoryErrorCode::InvalidInput
        )
    }

    fn user_message(&self) -> Option<&str> {
        if self.is_user_actionable() {
            Some(&self.message)
        } else {
            None
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
