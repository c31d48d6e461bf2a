//! Persisted scan records and the query shapes used to read them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::normalize::{format_date, map_province_code, map_vehicle_type, or_unknown, UNKNOWN};
use crate::parser::LicenseRecord;

/// Confidence in a scan's extracted data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScanQuality {
    Good,
    Fair,
    Poor,
}

impl ScanQuality {
    /// Grade a record by how many of its optional fields were resolved
    pub fn assess(record: &LicenseRecord) -> Self {
        Self::from_fields(&record.province, &record.expiry_date)
    }

    pub fn from_fields(province: &str, expiry_date: &str) -> Self {
        let unresolved = [province, expiry_date]
            .iter()
            .filter(|value| **value == UNKNOWN)
            .count();
        match unresolved {
            0 => ScanQuality::Good,
            1 => ScanQuality::Fair,
            _ => ScanQuality::Poor,
        }
    }
}

/// A saved scan. `id` and `business_id` never change after creation and
/// `verified` only ever goes from false to true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleScan {
    pub id: String,
    pub business_id: String,
    pub scanned_by: String,
    pub scanned_by_email: Option<String>,
    pub license_number: String,
    pub province: String,
    pub expiry_date: String,
    pub vehicle_type: String,
    pub raw_payload: String,
    pub scanned_at: DateTime<Utc>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<u16>,
    pub vin: Option<String>,
    pub owner_name: Option<String>,
    pub owner_id_number: Option<String>,
    pub scan_quality: ScanQuality,
    pub verified: bool,
    pub verified_by: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Data for a scan about to be created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewScan {
    pub scanned_by: String,
    pub scanned_by_email: Option<String>,
    pub license_number: String,
    pub province: String,
    pub expiry_date: String,
    pub vehicle_type: String,
    pub raw_payload: String,
    pub scanned_at: DateTime<Utc>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<u16>,
    pub vin: Option<String>,
    pub owner_name: Option<String>,
    pub owner_id_number: Option<String>,
    pub scan_quality: ScanQuality,
    pub notes: Option<String>,
}

impl NewScan {
    pub fn from_record(
        record: LicenseRecord,
        scanned_by: impl Into<String>,
        scanned_by_email: Option<String>,
    ) -> Self {
        let scan_quality = ScanQuality::assess(&record);
        Self {
            scanned_by: scanned_by.into(),
            scanned_by_email,
            license_number: record.license_number,
            province: record.province,
            expiry_date: record.expiry_date,
            vehicle_type: record.vehicle_type,
            raw_payload: record.raw_payload,
            scanned_at: record.scanned_at,
            make: None,
            model: None,
            year: None,
            vin: None,
            owner_name: None,
            owner_id_number: None,
            scan_quality,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Editable fields of an existing scan; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanUpdate {
    pub license_number: Option<String>,
    pub province: Option<String>,
    pub expiry_date: Option<String>,
    pub vehicle_type: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<u16>,
    pub vin: Option<String>,
    pub owner_name: Option<String>,
    pub owner_id_number: Option<String>,
    pub notes: Option<String>,
}

impl ScanUpdate {
    pub fn is_empty(&self) -> bool {
        self == &ScanUpdate::default()
    }

    /// Apply the update in place, leaving identity and verification alone.
    /// Edited province, expiry and vehicle type go through the same
    /// normalizers as parsed captures, and the quality grade follows them.
    pub fn apply_to(&self, scan: &mut VehicleScan) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *target = v.clone();
            }
        }
        fn set_opt<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
            if value.is_some() {
                *target = value.clone();
            }
        }

        set(&mut scan.license_number, &self.license_number.as_ref().map(|l| l.trim().to_string()));
        set(&mut scan.province, &self.province.as_deref().map(map_province_code));
        set(
            &mut scan.expiry_date,
            &self.expiry_date.as_deref().map(|d| format_date(&or_unknown(d))),
        );
        set(&mut scan.vehicle_type, &self.vehicle_type.as_deref().map(map_vehicle_type));
        set_opt(&mut scan.make, &self.make);
        set_opt(&mut scan.model, &self.model);
        set_opt(&mut scan.year, &self.year);
        set_opt(&mut scan.vin, &self.vin);
        set_opt(&mut scan.owner_name, &self.owner_name);
        set_opt(&mut scan.owner_id_number, &self.owner_id_number);
        set_opt(&mut scan.notes, &self.notes);
        scan.scan_quality = ScanQuality::from_fields(&scan.province, &scan.expiry_date);
    }
}

/// Filters for listing scans. All set filters must match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanFilters {
    pub verified: Option<bool>,
    pub province: Option<String>,
    pub vehicle_type: Option<String>,
    pub scanned_by: Option<String>,
    /// Case-insensitive substring of the license number
    pub license_contains: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl ScanFilters {
    pub fn matches(&self, scan: &VehicleScan) -> bool {
        let eq_ci = |filter: &Option<String>, value: &str| {
            filter
                .as_deref()
                .is_none_or(|f| f.trim().eq_ignore_ascii_case(value))
        };

        self.verified.is_none_or(|v| scan.verified == v)
            && eq_ci(&self.province, &scan.province)
            && eq_ci(&self.vehicle_type, &scan.vehicle_type)
            && self
                .scanned_by
                .as_deref()
                .is_none_or(|by| by == scan.scanned_by)
            && self.license_contains.as_deref().is_none_or(|needle| {
                scan.license_number
                    .to_ascii_uppercase()
                    .contains(&needle.trim().to_ascii_uppercase())
            })
            && self.since.is_none_or(|since| scan.scanned_at >= since)
            && self.until.is_none_or(|until| scan.scanned_at <= until)
    }

    /// Stable text form used as the cache query shape
    pub fn shape(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}

/// An earlier scan of the same license number within a business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateMatch {
    pub scan_id: String,
    pub scanned_at: DateTime<Utc>,
    pub scanned_by_email: Option<String>,
}

impl From<&VehicleScan> for DuplicateMatch {
    fn from(scan: &VehicleScan) -> Self {
        Self {
            scan_id: scan.id.clone(),
            scanned_at: scan.scanned_at,
            scanned_by_email: scan.scanned_by_email.clone(),
        }
    }
}

/// Aggregated counts for one business
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStatistics {
    pub total_scans: usize,
    pub scans_today: usize,
    pub scans_this_week: usize,
    pub scans_this_month: usize,
    pub unique_scanners: usize,
    pub unique_vehicles: usize,
    pub verified_scans: usize,
}
