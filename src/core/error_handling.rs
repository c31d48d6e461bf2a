//! Generic error handling utilities
//!
//! Lets the front end present errors uniformly while each subsystem keeps its
//! own error enum.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// When `is_user_actionable()` returns `true`, `user_message()` must return
/// `Some(message)` with text fit to show an operator at the scanner. When it
/// returns `false`, `user_message()` returns `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if this error carries a message that should be shown
    /// directly to the user (retry the capture, fix the input, ...)
    fn is_user_actionable(&self) -> bool;

    /// Returns the specific user message if this is a user-actionable error
    fn user_message(&self) -> Option<&str>;
}

/// Log errors with appropriate detail level based on error specificity
///
/// User-actionable errors log their own message; system errors log the
/// operation context. The full error is always available at debug level.
///
/// # Examples
/// ```rust,no_run
/// # use diskscan::core::error_handling::log_error_with_context;
/// # use diskscan::core::validation::ValidationError;
/// let err = ValidationError::new("A business id is required");
/// log_error_with_context(&err, "Starting scan session");
/// // Logs: "FATAL: A business id is required"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => log::error!("FATAL: {}", user_msg),
        _ => log::error!("FATAL: {}", operation_context),
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct UnreadableDisk;

    impl fmt::Display for UnreadableDisk {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "could not read disk")
        }
    }

    impl std::error::Error for UnreadableDisk {}

    impl ContextualError for UnreadableDisk {
        fn is_user_actionable(&self) -> bool {
            true
        }

        fn user_message(&self) -> Option<&str> {
            Some("could not read disk")
        }
    }

    #[derive(Debug)]
    struct StoreOffline;

    impl fmt::Display for StoreOffline {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "store offline: connection refused")
        }
    }

    impl std::error::Error for StoreOffline {}

    impl ContextualError for StoreOffline {
        fn is_user_actionable(&self) -> bool {
            false
        }

        fn user_message(&self) -> Option<&str> {
            None
        }
    }

    #[test]
    fn test_user_actionable_error_shows_specific_message() {
        let error = UnreadableDisk;
        assert!(error.is_user_actionable());
        assert_eq!(error.user_message(), Some("could not read disk"));
        log_error_with_context(&error, "Parsing capture");
    }

    #[test]
    fn test_system_error_uses_generic_context() {
        let error = StoreOffline;
        assert!(!error.is_user_actionable());
        assert_eq!(error.user_message(), None);
        log_error_with_context(&error, "Saving scan");
    }
}
