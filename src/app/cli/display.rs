//! CLI display utilities for formatting output

use colored::Colorize;
use prettytable::{format, Cell, Row, Table};

use crate::normalize::UNKNOWN;
use crate::parser::LicenseRecord;
use crate::repository::types::{DuplicateMatch, ScanStatistics, VehicleScan};

const LABEL_WIDTH: usize = 14;

fn field_line(label: &str, value: &str, use_color: bool) -> String {
    let label = format!("{:<width$}", format!("{}:", label), width = LABEL_WIDTH);
    match (use_color, value == UNKNOWN) {
        (true, true) => format!("{}{}", label.bold(), value.dimmed()),
        (true, false) => format!("{}{}", label.bold(), value),
        (false, _) => format!("{}{}", label, value),
    }
}

/// Multi-line description of a parsed record
pub fn format_record(record: &LicenseRecord, use_color: bool) -> String {
    [
        field_line("License", &record.license_number, use_color),
        field_line("Province", &record.province, use_color),
        field_line("Expires", &record.expiry_date, use_color),
        field_line("Vehicle type", &record.vehicle_type, use_color),
        field_line("Parsed via", &record.extraction.to_string(), use_color),
    ]
    .join("\n")
}

/// One-line confirmation for a saved scan
pub fn format_saved(scan: &VehicleScan, use_color: bool) -> String {
    let line = format!(
        "Saved {} ({}, expires {}, {}) as {} [{}]",
        scan.license_number,
        scan.province,
        scan.expiry_date,
        scan.vehicle_type,
        scan.id,
        scan.scan_quality
    );
    if use_color {
        line.green().to_string()
    } else {
        line
    }
}

/// Prompt text listing earlier scans of a license
pub fn format_duplicate_prompt(
    license_number: &str,
    matches: &[DuplicateMatch],
    use_color: bool,
) -> String {
    let mut lines = vec![format!(
        "{} has already been scanned {} time(s):",
        license_number,
        matches.len()
    )];
    lines.extend(matches.iter().map(|m| {
        format!(
            "  {} at {} by {}",
            m.scan_id,
            m.scanned_at.format("%Y-%m-%d %H:%M:%S UTC"),
            m.scanned_by_email.as_deref().unwrap_or("unknown operator")
        )
    }));
    lines.push("Scan anyway? [y/N]".to_string());

    let text = lines.join("\n");
    if use_color {
        text.yellow().to_string()
    } else {
        text
    }
}

pub fn format_error(message: &str, use_color: bool) -> String {
    if use_color {
        message.red().to_string()
    } else {
        message.to_string()
    }
}

fn count_row(label: &str, count: usize) -> Row {
    Row::new(vec![
        Cell::new(label),
        Cell::new(&count.to_string()).style_spec("r"),
    ])
}

/// Statistics of one business as a two-column table
pub fn statistics_table(business_id: &str, stats: &ScanStatistics) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.set_titles(Row::new(vec![
        Cell::new("Business").style_spec("b"),
        Cell::new(business_id).style_spec("b"),
    ]));
    table.add_row(count_row("Total scans", stats.total_scans));
    table.add_row(count_row("Today", stats.scans_today));
    table.add_row(count_row("This week", stats.scans_this_week));
    table.add_row(count_row("This month", stats.scans_this_month));
    table.add_row(count_row("Verified", stats.verified_scans));
    table.add_row(count_row("Unique vehicles", stats.unique_vehicles));
    table.add_row(count_row("Unique scanners", stats.unique_scanners));
    table
}
