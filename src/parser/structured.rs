//! Pipe-delimited payloads: `province | license | expiry | vehicle type | ...`

use super::error::{ParseError, ParseResult};
use crate::normalize::{format_date, map_province_code, map_vehicle_type, UNKNOWN};

/// Minimum number of `|` separated fields for positional parsing
pub const MIN_STRUCTURED_FIELDS: usize = 4;

/// Normalised fields of a structured payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredFields {
    pub license_number: String,
    pub province: String,
    pub expiry_date: String,
    pub vehicle_type: String,
}

/// Split a sanitised payload on `|`; `None` when there are too few fields
/// for positional parsing.
pub fn split_fields(sanitized: &str) -> Option<Vec<&str>> {
    let tokens: Vec<&str> = sanitized.split('|').map(str::trim).collect();
    if tokens.len() >= MIN_STRUCTURED_FIELDS {
        Some(tokens)
    } else {
        None
    }
}

/// Interpret the first four fields positionally. Fields beyond the fourth
/// (owner name, ID number, ...) are ignored.
pub fn parse_fields(tokens: &[&str]) -> ParseResult<StructuredFields> {
    let field = |index: usize| tokens.get(index).copied().unwrap_or("");

    let license_number = field(1);
    if license_number.is_empty() {
        return Err(ParseError::MissingStructuredLicense {
            token_count: tokens.len(),
        });
    }

    let expiry = field(2);
    let expiry_date = if expiry.is_empty() {
        UNKNOWN.to_string()
    } else {
        format_date(expiry)
    };

    Ok(StructuredFields {
        license_number: license_number.to_string(),
        province: map_province_code(field(0)),
        expiry_date,
        vehicle_type: map_vehicle_type(field(3)),
    })
}
