//! Reasons a payload yielded no record.
//!
//! These never reach the user directly; the public parse entry point turns
//! them into `None` and the controller reports a generic parse failure.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("payload is empty after sanitising")]
    EmptyPayload,

    #[error("structured payload with {token_count} fields has an empty license number")]
    MissingStructuredLicense { token_count: usize },

    #[error("no license number found in {lines_scanned} candidate lines")]
    NoLicenseNumber { lines_scanned: usize },
}

pub type ParseResult<T> = Result<T, ParseError>;
