//! Field normalization
//!
//! Pure, total functions that turn raw province, date and vehicle-type tokens
//! into their canonical forms. None of them fail: anything they cannot resolve
//! is either passed through or replaced by [`UNKNOWN`].

pub mod date;
pub mod province;
pub mod vehicle;

pub use date::format_date;
pub use province::{extract_province_from_license, map_province_code, Province};
pub use vehicle::{map_vehicle_type, DEFAULT_VEHICLE_TYPE};

/// Placeholder for any field that could not be resolved
pub const UNKNOWN: &str = "Unknown";

/// Replace an empty (after trimming) value with [`UNKNOWN`]
pub fn or_unknown(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        UNKNOWN.to_string()
    } else {
        trimmed.to_string()
    }
}
