//! Parser input and output types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// How a raw payload was captured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CaptureMethod {
    Barcode,
    OcrImage,
}

/// One capture from the camera collaborator. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawScanInput {
    pub payload: String,
    pub capture_method: CaptureMethod,
    pub captured_at: DateTime<Utc>,
}

impl RawScanInput {
    pub fn new(
        payload: impl Into<String>,
        capture_method: CaptureMethod,
        captured_at: DateTime<Utc>,
    ) -> Self {
        Self {
            payload: payload.into(),
            capture_method,
            captured_at,
        }
    }

    pub fn barcode(payload: impl Into<String>, captured_at: DateTime<Utc>) -> Self {
        Self::new(payload, CaptureMethod::Barcode, captured_at)
    }

    pub fn ocr(payload: impl Into<String>, captured_at: DateTime<Utc>) -> Self {
        Self::new(payload, CaptureMethod::OcrImage, captured_at)
    }
}

/// Which parsing phase produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionPath {
    /// Pipe-delimited positional fields
    Structured,
    /// Pattern search over free text
    Heuristic,
}

/// Structured vehicle-registration data extracted from one payload.
///
/// `license_number` is never empty. `province`, `expiry_date` and
/// `vehicle_type` always hold a canonical value or "Unknown".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseRecord {
    pub license_number: String,
    pub province: String,
    pub expiry_date: String,
    pub vehicle_type: String,
    pub raw_payload: String,
    pub scanned_at: DateTime<Utc>,
    pub extraction: ExtractionPath,
}
