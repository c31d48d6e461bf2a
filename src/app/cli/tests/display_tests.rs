//! Display formatting tests

use chrono::{TimeZone, Utc};

use crate::app::cli::display::*;
use crate::parser::try_parse;
use crate::repository::types::{DuplicateMatch, ScanStatistics};

#[test]
fn test_format_record_plain() {
    let record = try_parse("GP|ABC123GP||MV", Utc::now()).unwrap();
    let text = format_record(&record, false);

    assert!(text.contains("License:      ABC123GP"));
    assert!(text.contains("Province:     Gauteng"));
    assert!(text.contains("Expires:      Unknown"));
    assert!(text.contains("Parsed via:   Structured"));
}

#[test]
fn test_duplicate_prompt_lists_matches() {
    let matches = vec![DuplicateMatch {
        scan_id: "scan-0001".to_string(),
        scanned_at: Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0).unwrap(),
        scanned_by_email: None,
    }];
    let text = format_duplicate_prompt("ABC123GP", &matches, false);

    assert!(text.starts_with("ABC123GP has already been scanned 1 time(s):"));
    assert!(text.contains("scan-0001 at 2024-06-15 09:30:00 UTC by unknown operator"));
    assert!(text.ends_with("[y/N]"));
}

#[test]
fn test_statistics_table_rows() {
    let stats = ScanStatistics {
        total_scans: 12,
        scans_today: 3,
        ..ScanStatistics::default()
    };
    let table = statistics_table("shop-1", &stats);
    let rendered = table.to_string();

    assert_eq!(table.len(), 7);
    assert!(rendered.contains("shop-1"));
    assert!(rendered.contains("Total scans"));
    assert!(rendered.contains("12"));
}

#[test]
fn test_format_error_plain() {
    assert_eq!(format_error("boom", false), "boom");
}
