//! Expiry date canonicalization
//!
//! Four shapes are recognised. Full dates come out as `YYYY-MM-DD`, month
//! dates as `YYYY-MM`; day-first and month-first shapes are reordered.
//! Anything else is returned verbatim.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Recognised date layouts, in matching priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateShape {
    /// `YYYY-MM-DD` or `YYYY/MM/DD`
    YearMonthDay,
    /// `DD-MM-YYYY` or `DD/MM/YYYY`
    DayMonthYear,
    /// `YYYY-MM`
    YearMonth,
    /// `MM/YYYY`
    MonthYear,
}

struct ShapePatterns {
    shape: DateShape,
    exact: Regex,
    search: Regex,
}

fn shape_patterns(shape: DateShape, body: &str) -> ShapePatterns {
    ShapePatterns {
        shape,
        exact: Regex::new(&format!("^{}$", body)).expect("valid date pattern"),
        search: Regex::new(body).expect("valid date pattern"),
    }
}

static SHAPES: Lazy<Vec<ShapePatterns>> = Lazy::new(|| {
    vec![
        shape_patterns(
            DateShape::YearMonthDay,
            r"(?P<y>\d{4})[-/](?P<m>\d{2})[-/](?P<d>\d{2})",
        ),
        shape_patterns(
            DateShape::DayMonthYear,
            r"(?P<d>\d{2})[-/](?P<m>\d{2})[-/](?P<y>\d{4})",
        ),
        shape_patterns(DateShape::YearMonth, r"(?P<y>\d{4})-(?P<m>\d{2})"),
        shape_patterns(DateShape::MonthYear, r"(?P<m>\d{2})/(?P<y>\d{4})"),
    ]
});

impl DateShape {
    /// All shapes in the order they are tried
    pub fn all() -> [DateShape; 4] {
        [
            DateShape::YearMonthDay,
            DateShape::DayMonthYear,
            DateShape::YearMonth,
            DateShape::MonthYear,
        ]
    }

    fn patterns(&self) -> Option<&'static ShapePatterns> {
        SHAPES.iter().find(|p| p.shape == *self)
    }

    /// Leftmost substring of `text` with this shape
    pub fn find_in<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.patterns()?.search.find(text).map(|m| m.as_str())
    }

    /// Canonical rendering if `token` has exactly this shape
    pub fn canonicalize(&self, token: &str) -> Option<String> {
        let caps = self.patterns()?.exact.captures(token)?;
        Some(render(&caps))
    }
}

fn render(caps: &Captures<'_>) -> String {
    let year = &caps["y"];
    let month = &caps["m"];
    match caps.name("d") {
        Some(day) => format!("{}-{}-{}", year, month, day.as_str()),
        None => format!("{}-{}", year, month),
    }
}

/// Canonicalize a date token; unrecognised input is returned unchanged.
///
/// The function is idempotent: its own output is always one of the
/// recognised canonical shapes.
pub fn format_date(token: &str) -> String {
    let trimmed = token.trim();
    DateShape::all()
        .iter()
        .find_map(|shape| shape.canonicalize(trimmed))
        .unwrap_or_else(|| token.to_string())
}

/// First date-shaped substring of `text`, by shape priority
pub fn find_date(text: &str) -> Option<&str> {
    DateShape::all().iter().find_map(|shape| shape.find_in(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_first_dates() {
        assert_eq!(format_date("2024-12-31"), "2024-12-31");
        assert_eq!(format_date("2024/12/31"), "2024-12-31");
    }

    #[test]
    fn test_day_first_dates_are_reordered() {
        assert_eq!(format_date("31-12-2024"), "2024-12-31");
        assert_eq!(format_date("05/06/2025"), "2025-06-05");
    }

    #[test]
    fn test_month_dates() {
        assert_eq!(format_date("2024-12"), "2024-12");
        assert_eq!(format_date("12/2024"), "2024-12");
    }

    #[test]
    fn test_unrecognised_passes_through() {
        assert_eq!(format_date("next tuesday"), "next tuesday");
        assert_eq!(format_date("1/2/2024"), "1/2/2024");
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("Unknown"), "Unknown");
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored_for_recognised_shapes() {
        assert_eq!(format_date("  2024-12 "), "2024-12");
    }

    #[test]
    fn test_idempotent_for_all_shapes() {
        for input in [
            "2024-01-15",
            "2024/01/15",
            "15-01-2024",
            "15/01/2024",
            "2024-01",
            "01/2024",
            "garbage",
        ] {
            let once = format_date(input);
            assert_eq!(format_date(&once), once, "not idempotent for {}", input);
        }
    }

    #[test]
    fn test_find_date_prefers_full_dates() {
        assert_eq!(find_date("EXP 01/12/2024"), Some("01/12/2024"));
        assert_eq!(find_date("valid until 2025-03 only"), Some("2025-03"));
        assert_eq!(find_date("no dates"), None);
    }
}
