//! Free-text fallback for payloads without positional fields

use super::error::{ParseError, ParseResult};
use super::rules::{FieldKind, STANDARD_RULES};
use crate::normalize::{
    extract_province_from_license, format_date, map_vehicle_type, DEFAULT_VEHICLE_TYPE, UNKNOWN,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicFields {
    pub license_number: String,
    pub province: String,
    pub expiry_date: String,
    pub vehicle_type: String,
}

/// Candidate lines: split on newlines and pipes, blank lines dropped
pub fn candidate_lines(sanitized: &str) -> Vec<&str> {
    sanitized
        .split(['\n', '|'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Search the lines for each field independently. Only the license number
/// is required; every other field falls back to its default.
pub fn extract_fields(lines: &[&str]) -> ParseResult<HeuristicFields> {
    let license = STANDARD_RULES
        .first_match(FieldKind::LicenseNumber, lines)
        .ok_or(ParseError::NoLicenseNumber {
            lines_scanned: lines.len(),
        })?;
    log::trace!(
        "license '{}' matched rule '{}' on line {}",
        license.text,
        license.rule,
        license.line_index
    );

    let province = extract_province_from_license(license.text)
        .map(|p| p.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string());

    let expiry_date = STANDARD_RULES
        .first_match(FieldKind::Date, lines)
        .map(|hit| format_date(hit.text))
        .unwrap_or_else(|| UNKNOWN.to_string());

    let vehicle_type = STANDARD_RULES
        .first_match(FieldKind::VehicleType, lines)
        .map(|hit| map_vehicle_type(hit.text))
        .unwrap_or_else(|| DEFAULT_VEHICLE_TYPE.to_string());

    Ok(HeuristicFields {
        license_number: license.text.to_string(),
        province,
        expiry_date,
        vehicle_type,
    })
}
