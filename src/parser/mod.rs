//! License disk data parser
//!
//! Turns an arbitrary barcode or OCR string into a [`LicenseRecord`]. Parsing
//! runs in two phases:
//!
//! - **Structured**: the sanitised payload is split on `|`; with at least four
//!   fields they are read positionally as province, license number, expiry
//!   date and vehicle type.
//! - **Heuristic**: otherwise the payload is split into lines and searched
//!   with the priority-ordered rules in [`rules`].
//!
//! A record is produced iff a license number was found. Parsing is pure apart
//! from the injected scan timestamp and never panics on any input.

pub mod error;
pub mod heuristic;
pub mod rules;
pub mod structured;
pub mod types;


use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::core::time::{system_clock, Clock};
pub use error::{ParseError, ParseResult};
pub use types::{CaptureMethod, ExtractionPath, LicenseRecord, RawScanInput};

/// Drop every character outside `[A-Za-z0-9 |/\-:.]`. Line breaks are kept
/// (carriage returns become `\n`) so the heuristic phase can still see lines.
pub fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | ' ' | '|' | '/' | '-' | ':' | '.' | '\n' => {
                Some(c)
            }
            '\r' => Some('\n'),
            _ => None,
        })
        .collect()
}

/// Parse a payload, reporting why no record could be produced
pub fn try_parse(raw: &str, scanned_at: DateTime<Utc>) -> ParseResult<LicenseRecord> {
    let sanitized = sanitize(raw);
    if sanitized.trim().is_empty() {
        return Err(ParseError::EmptyPayload);
    }

    let (fields, extraction) = match structured::split_fields(&sanitized) {
        Some(tokens) => {
            let f = structured::parse_fields(&tokens)?;
            (
                (f.license_number, f.province, f.expiry_date, f.vehicle_type),
                ExtractionPath::Structured,
            )
        }
        None => {
            let lines = heuristic::candidate_lines(&sanitized);
            let f = heuristic::extract_fields(&lines)?;
            (
                (f.license_number, f.province, f.expiry_date, f.vehicle_type),
                ExtractionPath::Heuristic,
            )
        }
    };
    let (license_number, province, expiry_date, vehicle_type) = fields;

    Ok(LicenseRecord {
        license_number,
        province,
        expiry_date,
        vehicle_type,
        raw_payload: raw.to_string(),
        scanned_at,
        extraction,
    })
}

/// Parse a payload; `None` when no license number can be extracted
pub fn parse_license_data(raw: &str, scanned_at: DateTime<Utc>) -> Option<LicenseRecord> {
    match try_parse(raw, scanned_at) {
        Ok(record) => {
            log::debug!(
                "Parsed license {} via {} path",
                record.license_number,
                record.extraction
            );
            Some(record)
        }
        Err(e) => {
            log::debug!("No license record extracted: {}", e);
            None
        }
    }
}

/// Parser bound to a clock that stamps each record
#[derive(Clone)]
pub struct LicenseDataParser {
    clock: Arc<dyn Clock>,
}

impl Default for LicenseDataParser {
    fn default() -> Self {
        Self::new(system_clock())
    }
}

impl LicenseDataParser {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn parse(&self, raw: &str) -> Option<LicenseRecord> {
        parse_license_data(raw, self.clock.now_utc())
    }

    /// Parse a capture, stamping the record with the capture time
    pub fn parse_input(&self, input: &RawScanInput) -> Option<LicenseRecord> {
        parse_license_data(&input.payload, input.captured_at)
    }
}
