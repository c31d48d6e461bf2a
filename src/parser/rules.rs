//! Priority-ordered extraction rules
//!
//! Each rule is tagged with the field it extracts and a priority. For a given
//! field the lines are scanned in order and, within each line, the rules of
//! that field are tried lowest priority number first; the first hit wins.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::normalize::date::DateShape;
use crate::normalize::vehicle::VEHICLE_KEYWORDS;

/// Field a rule extracts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    LicenseNumber,
    Date,
    VehicleType,
}

#[derive(Debug)]
pub enum Matcher {
    Pattern(Regex),
    Date(DateShape),
}

impl Matcher {
    fn find<'t>(&self, line: &'t str) -> Option<&'t str> {
        match self {
            Matcher::Pattern(re) => re.find(line).map(|m| m.as_str()),
            Matcher::Date(shape) => shape.find_in(line),
        }
    }
}

#[derive(Debug)]
pub struct ExtractionRule {
    pub kind: FieldKind,
    pub priority: u8,
    pub name: &'static str,
    pub matcher: Matcher,
}

impl ExtractionRule {
    fn pattern(kind: FieldKind, priority: u8, name: &'static str, pattern: &str) -> Self {
        Self {
            kind,
            priority,
            name,
            matcher: Matcher::Pattern(Regex::new(pattern).expect("valid extraction pattern")),
        }
    }

    /// Matched substring of `line`, if any
    pub fn find<'t>(&self, line: &'t str) -> Option<&'t str> {
        self.matcher.find(line)
    }
}

/// A hit produced by [`RuleSet::first_match`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch<'t> {
    pub rule: &'static str,
    pub line_index: usize,
    pub text: &'t str,
}

#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<ExtractionRule>,
}

impl RuleSet {
    pub fn new(mut rules: Vec<ExtractionRule>) -> Self {
        rules.sort_by_key(|r| r.priority);
        Self { rules }
    }

    /// Rules for one field, in priority order
    pub fn rules_for(&self, kind: FieldKind) -> impl Iterator<Item = &ExtractionRule> {
        self.rules.iter().filter(move |r| r.kind == kind)
    }

    pub fn first_match<'t, S: AsRef<str>>(
        &self,
        kind: FieldKind,
        lines: &'t [S],
    ) -> Option<RuleMatch<'t>> {
        lines.iter().enumerate().find_map(|(line_index, line)| {
            self.rules_for(kind).find_map(|rule| {
                rule.find(line.as_ref()).map(|text| RuleMatch {
                    rule: rule.name,
                    line_index,
                    text,
                })
            })
        })
    }
}

/// Rules used by the heuristic parser
pub static STANDARD_RULES: Lazy<RuleSet> = Lazy::new(|| {
    let mut rules = vec![
        // Province-suffixed plates: ABC123GP, ND12345KZN-style personalised numbers
        ExtractionRule::pattern(
            FieldKind::LicenseNumber,
            0,
            "letters-digits-suffix",
            r"[A-Z]{2,3}\d{3,6}[A-Z]{2}",
        ),
        ExtractionRule::pattern(
            FieldKind::LicenseNumber,
            1,
            "digits-letters-digits",
            r"\d{3}[A-Z]{3}\d{3}",
        ),
        ExtractionRule::pattern(
            FieldKind::LicenseNumber,
            2,
            "letters-six-digits",
            r"[A-Z]{2}\d{6}",
        ),
        ExtractionRule::pattern(
            FieldKind::LicenseNumber,
            3,
            "three-letters-digits-suffix",
            r"[A-Z]{3}\d{3}[A-Z]{2}",
        ),
    ];

    rules.extend(
        DateShape::all()
            .into_iter()
            .enumerate()
            .map(|(priority, shape)| ExtractionRule {
                kind: FieldKind::Date,
                priority: priority as u8,
                name: "date",
                matcher: Matcher::Date(shape),
            }),
    );

    rules.extend(
        VEHICLE_KEYWORDS
            .iter()
            .enumerate()
            .map(|(priority, keyword)| {
                let words: Vec<String> = keyword.split(' ').map(regex::escape).collect();
                ExtractionRule::pattern(
                    FieldKind::VehicleType,
                    priority as u8,
                    *keyword,
                    &format!(r"(?i)\b{}\b", words.join(r"\s+")),
                )
            }),
    );

    RuleSet::new(rules)
});

#[cfg(test)]
mod tests {
    use super::*;

    fn license_rule(name: &str) -> &'static ExtractionRule {
        STANDARD_RULES
            .rules_for(FieldKind::LicenseNumber)
            .find(|r| r.name == name)
            .unwrap()
    }

    #[test]
    fn test_license_rules_are_ordered() {
        let names: Vec<&str> = STANDARD_RULES
            .rules_for(FieldKind::LicenseNumber)
            .map(|r| r.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "letters-digits-suffix",
                "digits-letters-digits",
                "letters-six-digits",
                "three-letters-digits-suffix"
            ]
        );
    }

    #[test]
    fn test_each_license_rule_in_isolation() {
        assert_eq!(
            license_rule("letters-digits-suffix").find("plate XYZ456WC"),
            Some("XYZ456WC")
        );
        assert_eq!(
            license_rule("digits-letters-digits").find("no 123ABC456"),
            Some("123ABC456")
        );
        assert_eq!(
            license_rule("letters-six-digits").find("CA123456"),
            Some("CA123456")
        );
        assert_eq!(
            license_rule("three-letters-digits-suffix").find("BCD321FS"),
            Some("BCD321FS")
        );
        assert_eq!(license_rule("letters-six-digits").find("ca123456"), None);
    }

    #[test]
    fn test_first_match_scans_lines_in_order() {
        let lines = vec!["header", "CA123456", "XYZ456WC"];
        let hit = STANDARD_RULES
            .first_match(FieldKind::LicenseNumber, &lines)
            .unwrap();
        assert_eq!(hit.text, "CA123456");
        assert_eq!(hit.line_index, 1);
        assert_eq!(hit.rule, "letters-six-digits");
    }

    #[test]
    fn test_priority_wins_within_a_line() {
        let lines = vec!["CA123456 XYZ456WC"];
        let hit = STANDARD_RULES
            .first_match(FieldKind::LicenseNumber, &lines)
            .unwrap();
        assert_eq!(hit.text, "XYZ456WC");
    }

    #[test]
    fn test_vehicle_keywords_are_case_insensitive_words() {
        let lines = vec!["class: motor  vehicle"];
        let hit = STANDARD_RULES
            .first_match(FieldKind::VehicleType, &lines)
            .unwrap();
        assert_eq!(hit.text, "motor  vehicle");

        let business = vec!["BUSINESS USE"];
        assert!(STANDARD_RULES
            .first_match(FieldKind::VehicleType, &business)
            .is_none());
    }

    #[test]
    fn test_date_rules_follow_shape_priority() {
        let lines = vec!["12/2025 2024-06-30"];
        let hit = STANDARD_RULES.first_match(FieldKind::Date, &lines).unwrap();
        assert_eq!(hit.text, "2024-06-30");
    }
}
