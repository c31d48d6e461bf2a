//! Scanner API
//!
//! Public entry points of the scanner system. Front ends import from here
//! rather than from the individual modules.

pub use crate::scanner::controller::{CaptureOutcome, ScanContext, ScanLifecycleController, ScanState};
pub use crate::scanner::duplicate::DuplicateDetector;
pub use crate::scanner::error::{
    ScanError, ScanResult, DUPLICATE_DECLINED_MESSAGE, PARSE_FAILURE_MESSAGE,
};
pub use crate::scanner::records::{ScanRecords, UpdatedScan};
