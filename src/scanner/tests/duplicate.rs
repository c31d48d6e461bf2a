//! Duplicate detection tests

use chrono::Duration;

use super::{base_time, Harness};
use crate::parser::{ExtractionPath, LicenseRecord};
use crate::repository::api::{NewScan, ScanRepository};
use crate::scanner::api::DuplicateDetector;

fn scan_of(license: &str, minutes_later: i64) -> NewScan {
    NewScan::from_record(
        LicenseRecord {
            license_number: license.to_string(),
            province: "Gauteng".to_string(),
            expiry_date: "2025-03".to_string(),
            vehicle_type: "Motor Vehicle".to_string(),
            raw_payload: license.to_string(),
            scanned_at: base_time() + Duration::minutes(minutes_later),
            extraction: ExtractionPath::Heuristic,
        },
        "operator-1",
        None,
    )
}

#[tokio::test]
async fn test_unseen_license_has_no_matches() {
    let harness = Harness::new();
    let detector = DuplicateDetector::new(harness.repository.clone());
    harness
        .repository
        .create_scan(scan_of("ABC123GP", 0), "shop-a")
        .await
        .unwrap();

    let matches = detector
        .check_duplicate_license("XYZ456WC", "shop-a", None)
        .await
        .unwrap();
    assert!(matches.is_empty());
}

#[tokio::test]
async fn test_matches_stay_within_business() {
    let harness = Harness::new();
    let detector = DuplicateDetector::new(harness.repository.clone());
    let own = harness
        .repository
        .create_scan(scan_of("ABC123GP", 0), "shop-a")
        .await
        .unwrap();
    harness
        .repository
        .create_scan(scan_of("ABC123GP", 5), "shop-b")
        .await
        .unwrap();

    let matches = detector
        .check_duplicate_license("ABC123GP", "shop-a", None)
        .await
        .unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].scan_id, own.id);

    let none = detector
        .check_duplicate_license("ABC123GP", "shop-c", None)
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_matches_most_recent_first_and_trimmed() {
    let harness = Harness::new();
    let detector = DuplicateDetector::new(harness.repository.clone());
    let older = harness
        .repository
        .create_scan(scan_of("ABC123GP", 0), "shop-a")
        .await
        .unwrap();
    let newer = harness
        .repository
        .create_scan(scan_of("ABC123GP", 30), "shop-a")
        .await
        .unwrap();

    let matches = detector
        .check_duplicate_license("  ABC123GP\t", "shop-a", None)
        .await
        .unwrap();
    let ids: Vec<_> = matches.iter().map(|m| m.scan_id.clone()).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
}

#[tokio::test]
async fn test_exclude_scan_being_edited() {
    let harness = Harness::new();
    let detector = DuplicateDetector::new(harness.repository.clone());
    let edited = harness
        .repository
        .create_scan(scan_of("ABC123GP", 0), "shop-a")
        .await
        .unwrap();

    let matches = detector
        .check_duplicate_license("ABC123GP", "shop-a", Some(&edited.id))
        .await
        .unwrap();
    assert!(matches.is_empty());
}

#[tokio::test]
async fn test_matching_is_exact() {
    let harness = Harness::new();
    let detector = DuplicateDetector::new(harness.repository.clone());
    harness
        .repository
        .create_scan(scan_of("ABC123GP", 0), "shop-a")
        .await
        .unwrap();

    for probe in ["ABC123G", "abc123gp", "ABC123GPX"] {
        let matches = detector
            .check_duplicate_license(probe, "shop-a", None)
            .await
            .unwrap();
        assert!(matches.is_empty(), "{} should not match", probe);
    }
}

#[tokio::test]
async fn test_blank_input() {
    let harness = Harness::new();
    let detector = DuplicateDetector::new(harness.repository.clone());

    assert!(detector
        .check_duplicate_license("   ", "shop-a", None)
        .await
        .unwrap()
        .is_empty());
    assert!(detector
        .check_duplicate_license("ABC123GP", " ", None)
        .await
        .is_err());
}
