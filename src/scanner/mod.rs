//! Scanner Component
//!
//! Turns captures from the camera into saved scans for one business:
//!
//! - **ScanLifecycleController**: one attempt at a time through parse,
//!   duplicate decision and persistence
//! - **DuplicateDetector**: earlier scans of a license within the business
//! - **ScanRecords**: verification, edits and deletion of saved scans
//!
//! Lifecycle events go out through the controller's notification manager.

pub mod api;
pub mod controller;
pub mod duplicate;
pub mod error;
pub mod records;

#[cfg(test)]
mod tests;

pub use error::{ScanError, ScanResult};
