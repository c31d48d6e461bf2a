//! Vehicle type abbreviations

/// Vehicle type used when the disk does not say
pub const DEFAULT_VEHICLE_TYPE: &str = "Motor Vehicle";

// (token, canonical). Lookup is case-insensitive on the token.
const VEHICLE_TYPES: &[(&str, &str)] = &[
    ("MV", "Motor Vehicle"),
    ("MOTOR VEHICLE", "Motor Vehicle"),
    ("MC", "Motorcycle"),
    ("MOTORCYCLE", "Motorcycle"),
    ("TR", "Trailer"),
    ("TRAILER", "Trailer"),
    ("BUS", "BUS"),
    ("TRUCK", "TRUCK"),
    ("TAXI", "TAXI"),
];

/// Keywords searched for in free text, in priority order
pub const VEHICLE_KEYWORDS: &[&str] =
    &["MOTOR VEHICLE", "MOTORCYCLE", "TRAILER", "BUS", "TRUCK", "TAXI"];

/// Map a vehicle-type token to its canonical form.
///
/// Empty input yields [`DEFAULT_VEHICLE_TYPE`]; unknown tokens pass through.
pub fn map_vehicle_type(token: &str) -> String {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return DEFAULT_VEHICLE_TYPE.to_string();
    }

    // OCR output often splits "MOTOR  VEHICLE" over several spaces
    let collapsed = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
    VEHICLE_TYPES
        .iter()
        .find(|(abbr, _)| abbr.eq_ignore_ascii_case(&collapsed))
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviations() {
        assert_eq!(map_vehicle_type("MV"), "Motor Vehicle");
        assert_eq!(map_vehicle_type("mc"), "Motorcycle");
        assert_eq!(map_vehicle_type("TR"), "Trailer");
    }

    #[test]
    fn test_full_names() {
        assert_eq!(map_vehicle_type("MOTOR VEHICLE"), "Motor Vehicle");
        assert_eq!(map_vehicle_type("motor   vehicle"), "Motor Vehicle");
        assert_eq!(map_vehicle_type("Trailer"), "Trailer");
    }

    #[test]
    fn test_heavy_vehicles_keep_their_name() {
        assert_eq!(map_vehicle_type("BUS"), "BUS");
        assert_eq!(map_vehicle_type("truck"), "TRUCK");
        assert_eq!(map_vehicle_type("TAXI"), "TAXI");
    }

    #[test]
    fn test_empty_defaults_and_unknown_passes_through() {
        assert_eq!(map_vehicle_type(""), DEFAULT_VEHICLE_TYPE);
        assert_eq!(map_vehicle_type("  "), DEFAULT_VEHICLE_TYPE);
        assert_eq!(map_vehicle_type("Tractor"), "Tractor");
    }
}
