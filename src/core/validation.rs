//! Input validation shared by the repository and controller boundaries

use thiserror::Error;

/// Largest page size a caller may request from `get_scans`
pub const MAX_PAGE_SIZE: usize = 500;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl crate::core::error_handling::ContextualError for ValidationError {
    fn is_user_actionable(&self) -> bool {
        true
    }

    fn user_message(&self) -> Option<&str> {
        Some(&self.message)
    }
}

/// Every read and write is tenant scoped, so a blank business id is rejected
/// before any repository work happens.
pub fn validate_business_id(business_id: &str) -> Result<&str, ValidationError> {
    let trimmed = business_id.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("A business id is required"));
    }
    Ok(trimmed)
}

pub fn validate_scan_id(scan_id: &str) -> Result<&str, ValidationError> {
    let trimmed = scan_id.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("A scan id is required"));
    }
    Ok(trimmed)
}

/// Verification is attributed, so the verifier must be named
pub fn validate_verifier(verified_by: &str) -> Result<&str, ValidationError> {
    let trimmed = verified_by.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("A verifier is required"));
    }
    Ok(trimmed)
}

pub fn validate_license_number(license_number: &str) -> Result<&str, ValidationError> {
    let trimmed = license_number.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("A license number is required"));
    }
    Ok(trimmed)
}

/// Validate a page size, returning it unchanged when acceptable
pub fn validate_page_size(limit: usize) -> Result<usize, ValidationError> {
    match limit {
        0 => Err(ValidationError::new("Page size must be greater than 0")),
        n if n > MAX_PAGE_SIZE => Err(ValidationError::new(format!(
            "Page size {} exceeds the maximum of {}",
            n, MAX_PAGE_SIZE
        ))),
        n => Ok(n),
    }
}
