//! South African province codes

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use super::UNKNOWN;

/// The nine provinces, displayed by their full name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
pub enum Province {
    #[strum(serialize = "Gauteng")]
    Gauteng,
    #[strum(serialize = "Western Cape")]
    WesternCape,
    #[strum(serialize = "KwaZulu-Natal")]
    KwaZuluNatal,
    #[strum(serialize = "Eastern Cape")]
    EasternCape,
    #[strum(serialize = "Free State")]
    FreeState,
    #[strum(serialize = "Limpopo")]
    Limpopo,
    #[strum(serialize = "Mpumalanga")]
    Mpumalanga,
    #[strum(serialize = "Northern Cape")]
    NorthernCape,
    #[strum(serialize = "North West")]
    NorthWest,
}

impl Province {
    /// Registration code as printed on plates and disks
    pub fn code(&self) -> &'static str {
        match self {
            Province::Gauteng => "GP",
            Province::WesternCape => "WC",
            Province::KwaZuluNatal => "KZN",
            Province::EasternCape => "EC",
            Province::FreeState => "FS",
            Province::Limpopo => "LP",
            Province::Mpumalanga => "MP",
            Province::NorthernCape => "NC",
            Province::NorthWest => "NW",
        }
    }

    /// Case-insensitive lookup by registration code
    pub fn from_code(code: &str) -> Option<Self> {
        Province::iter().find(|p| p.code().eq_ignore_ascii_case(code))
    }

    /// Case-insensitive lookup by full name ("western cape" -> WesternCape)
    pub fn from_name(name: &str) -> Option<Self> {
        Province::iter().find(|p| p.to_string().eq_ignore_ascii_case(name))
    }

    /// Provinces ordered so that longer codes are tried first
    pub fn by_code_length() -> Vec<Self> {
        let mut provinces: Vec<Self> = Province::iter().collect();
        provinces.sort_by_key(|p| std::cmp::Reverse(p.code().len()));
        provinces
    }
}

/// Map a province code to its full name.
///
/// Empty input maps to "Unknown"; a full province name in any case maps to its
/// canonical spelling; anything else is returned unchanged.
pub fn map_province_code(code: &str) -> String {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return UNKNOWN.to_string();
    }

    Province::from_code(trimmed)
        .or_else(|| Province::from_name(trimmed))
        .map(|p| p.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Derive the province from a license number's trailing code.
///
/// "KZN" is checked before the two-letter codes so a KwaZulu-Natal number is
/// never read as ending in "ZN"-something shorter.
pub fn extract_province_from_license(license: &str) -> Option<Province> {
    let upper = license.trim().to_ascii_uppercase();
    Province::by_code_length()
        .into_iter()
        .find(|p| upper.ends_with(p.code()))
}
