//! Repository tests


use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::repository::types::{NewScan, ScanQuality};

pub(super) fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

pub(super) fn new_scan(license: &str, by: &str, minutes_ago: i64) -> NewScan {
    NewScan {
        scanned_by: by.to_string(),
        scanned_by_email: Some(format!("{}@shop.example", by)),
        license_number: license.to_string(),
        province: "Gauteng".to_string(),
        expiry_date: "2025-01".to_string(),
        vehicle_type: "Motor Vehicle".to_string(),
        raw_payload: format!("GP|{}|2025-01|MV", license),
        scanned_at: base_time() - Duration::minutes(minutes_ago),
        make: None,
        model: None,
        year: None,
        vin: None,
        owner_name: None,
        owner_id_number: None,
        scan_quality: ScanQuality::Good,
        notes: None,
    }
}
