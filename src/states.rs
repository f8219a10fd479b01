//! Indian state names and their GST state codes.

use std::sync::OnceLock;

use regex::Regex;

/// Canonical state / union territory names by GST state code.
const STATES: &[(&str, &str)] = &[
    ("01", "Jammu and Kashmir"),
    ("02", "Himachal Pradesh"),
    ("03", "Punjab"),
    ("04", "Chandigarh"),
    ("05", "Uttarakhand"),
    ("06", "Haryana"),
    ("07", "Delhi"),
    ("08", "Rajasthan"),
    ("09", "Uttar Pradesh"),
    ("10", "Bihar"),
    ("11", "Sikkim"),
    ("12", "Arunachal Pradesh"),
    ("13", "Nagaland"),
    ("14", "Manipur"),
    ("15", "Mizoram"),
    ("16", "Tripura"),
    ("17", "Meghalaya"),
    ("18", "Assam"),
    ("19", "West Bengal"),
    ("20", "Jharkhand"),
    ("21", "Odisha"),
    ("22", "Chhattisgarh"),
    ("23", "Madhya Pradesh"),
    ("24", "Gujarat"),
    ("26", "Dadra and Nagar Haveli and Daman and Diu"),
    ("27", "Maharashtra"),
    ("29", "Karnataka"),
    ("30", "Goa"),
    ("31", "Lakshadweep"),
    ("32", "Kerala"),
    ("33", "Tamil Nadu"),
    ("34", "Puducherry"),
    ("35", "Andaman and Nicobar Islands"),
    ("36", "Telangana"),
    ("37", "Andhra Pradesh"),
    ("38", "Ladakh"),
    ("97", "Other Territory"),
];

/// Older or informal spellings still found in saved addresses.
const ALIASES: &[(&str, &str)] = &[
    ("orissa", "21"),
    ("pondicherry", "34"),
    ("new delhi", "07"),
    ("nct of delhi", "07"),
    ("uttaranchal", "05"),
    ("daman and diu", "26"),
    ("dadra and nagar haveli", "26"),
    ("andaman and nicobar", "35"),
    ("j and k", "01"),
];

fn canonical(name: &str) -> String {
    name.replace('&', " and ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// GST state code for a state name, ignoring case, spacing and `&`.
pub fn state_code(name: &str) -> Option<&'static str> {
    let key = canonical(name);
    if key.is_empty() {
        return None;
    }
    STATES
        .iter()
        .find(|(_, n)| canonical(n) == key)
        .map(|(code, _)| *code)
        .or_else(|| ALIASES.iter().find(|(a, _)| *a == key).map(|(_, code)| *code))
}

/// State name for a GST state code. Single digits are accepted ("7" → Delhi).
pub fn state_name(code: &str) -> Option<&'static str> {
    let code = code.trim();
    let padded = match code.len() {
        1 => format!("0{code}"),
        _ => code.to_string(),
    };
    STATES.iter().find(|(c, _)| *c == padded).map(|(_, name)| *name)
}

fn gstin_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]$").expect("valid GSTIN pattern")
    })
}

/// Structural GSTIN check: state code, PAN, entity number, `Z`, checksum char.
/// The checksum digit itself is not verified.
pub fn is_valid_gstin(gstin: &str) -> bool {
    let gstin = gstin.trim().to_uppercase();
    gstin_pattern().is_match(&gstin) && state_name(&gstin[..2]).is_some()
}

/// State encoded in the first two digits of a GSTIN.
pub fn state_from_gstin(gstin: &str) -> Option<&'static str> {
    let gstin = gstin.trim();
    if gstin.len() < 2 || !gstin.is_char_boundary(2) {
        return None;
    }
    state_name(&gstin[..2])
}

/// Place-of-supply label: "Maharashtra (27)", or the name alone if unknown.
pub fn place_of_supply(state: Option<&str>) -> String {
    let Some(state) = state.map(str::trim).filter(|s| !s.is_empty()) else {
        return "-".to_string();
    };
    match state_code(state) {
        Some(code) => format!("{state} ({code})"),
        None => state.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_code_lookup() {
        assert_eq!(state_code("Maharashtra"), Some("27"));
        assert_eq!(state_code("  tamil   NADU "), Some("33"));
        assert_eq!(state_code("Jammu & Kashmir"), Some("01"));
        assert_eq!(state_code("Orissa"), Some("21"));
        assert_eq!(state_code("Atlantis"), None);
        assert_eq!(state_code(""), None);
    }

    #[test]
    fn test_state_name_lookup() {
        assert_eq!(state_name("24"), Some("Gujarat"));
        assert_eq!(state_name("7"), Some("Delhi"));
        assert_eq!(state_name("25"), None);
    }

    #[test]
    fn test_gstin_validation() {
        assert!(is_valid_gstin("27AAAPL1234C1Z5"));
        assert!(is_valid_gstin(" 27aaapl1234c1z5 "));
        assert!(!is_valid_gstin("27AAAPL1234C1X5"));
        assert!(!is_valid_gstin("99AAAPL1234C1Z5"));
        assert!(!is_valid_gstin("27AAAPL1234"));
        assert!(!is_valid_gstin(""));
    }

    #[test]
    fn test_state_from_gstin() {
        assert_eq!(state_from_gstin("29ABCDE1234F1Z5"), Some("Karnataka"));
        assert_eq!(state_from_gstin("2"), None);
        assert_eq!(state_from_gstin("₹₹"), None);
    }

    #[test]
    fn test_place_of_supply() {
        assert_eq!(place_of_supply(Some("Gujarat")), "Gujarat (24)");
        assert_eq!(place_of_supply(Some("Narnia")), "Narnia");
        assert_eq!(place_of_supply(None), "-");
    }
}
