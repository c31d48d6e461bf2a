//! Synchronization utilities for robust mutex handling
//!
//! Converts lock poisoning into domain errors instead of panicking, so a panic
//! in one caller never takes the repository or cache down with it.

use std::sync::LockResult;

/// Handle poisoned mutex cases with consistent error handling
///
/// # Examples
/// ```
/// use std::sync::Mutex;
/// use diskscan::core::sync::handle_mutex_poison;
/// use diskscan::repository::api::RepositoryError;
///
/// let mutex = Mutex::new(42);
/// let guard = handle_mutex_poison(mutex.lock(), RepositoryError::internal).unwrap();
/// assert_eq!(*guard, 42);
/// ```
pub fn handle_mutex_poison<T, E>(
    result: LockResult<T>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<T, E> {
    result.map_err(|poison_err| {
        error_constructor(format!(
            "Internal synchronisation error (mutex poisoned). This indicates a panic occurred while holding a lock. PoisonError: {:?}",
            poison_err
        ))
    })
}
