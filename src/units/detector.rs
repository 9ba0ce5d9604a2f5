use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex pattern to detect quantity strings
    /// Matches: optional sign + number (optional decimal, optional exponent) + optional whitespace + unit word
    /// Examples: "100 m", "10.5 km", "-3e2 ft", "2mi", ".5 yards"
    static ref QUANTITY_PATTERN: Regex = Regex::new(
        r"^(?P<value>[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)\s*(?P<unit>[A-Za-z]+)$"
    ).unwrap();
}

/// Check if a string looks like a quantity expression
pub fn looks_like_quantity(s: &str) -> bool {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return false;
    }

    QUANTITY_PATTERN.is_match(trimmed)
}

/// Split a quantity string into its number and unit parts
pub(crate) fn split_quantity(s: &str) -> Option<(&str, &str)> {
    let caps = QUANTITY_PATTERN.captures(s.trim())?;
    Some((caps.name("value")?.as_str(), caps.name("unit")?.as_str()))
}
