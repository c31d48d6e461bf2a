//! Per-business scan statistics

use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;

use super::types::{ScanStatistics, VehicleScan};

/// Aggregate statistics for one business's scans as of `now`.
///
/// "Today" starts at 00:00 UTC; the week and month windows are the trailing
/// 7 and 30 days. Scans stamped after `now` only count toward the totals.
pub fn aggregate<'a, I>(scans: I, now: DateTime<Utc>) -> ScanStatistics
where
    I: IntoIterator<Item = &'a VehicleScan>,
{
    let start_of_day = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or(now);
    let week_ago = now - Duration::days(7);
    let month_ago = now - Duration::days(30);

    let in_window = |at: DateTime<Utc>, from: DateTime<Utc>| at >= from && at <= now;

    let mut stats = ScanStatistics::default();
    let mut scanners = HashSet::new();
    let mut vehicles = HashSet::new();

    for scan in scans {
        stats.total_scans += 1;
        if in_window(scan.scanned_at, start_of_day) {
            stats.scans_today += 1;
        }
        if in_window(scan.scanned_at, week_ago) {
            stats.scans_this_week += 1;
        }
        if in_window(scan.scanned_at, month_ago) {
            stats.scans_this_month += 1;
        }
        if scan.verified {
            stats.verified_scans += 1;
        }
        scanners.insert(scan.scanned_by.as_str());
        vehicles.insert(scan.license_number.trim().to_ascii_uppercase());
    }

    stats.unique_scanners = scanners.len();
    stats.unique_vehicles = vehicles.len();
    stats
}
