use crate::units::error::UnitError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Static description of a unit: its display label and how many meters one unit is
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitInfo {
    /// Short label shown in pickers and output (e.g., "km")
    pub label: &'static str,
    /// Plural long name (e.g., "kilometers")
    pub name: &'static str,
    /// 1 unit = `factor_to_base` meters
    pub factor_to_base: f64,
}

/// A supported unit of length.
///
/// The declaration order is the selector order used by the form: 0 is meters,
/// 4 is miles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Unit {
    #[default]
    Meters,
    Kilometers,
    Feet,
    Yards,
    Miles,
}

const METERS: UnitInfo = UnitInfo {
    label: "m",
    name: "meters",
    factor_to_base: 1.0,
};

const KILOMETERS: UnitInfo = UnitInfo {
    label: "km",
    name: "kilometers",
    factor_to_base: 1000.0,
};

const FEET: UnitInfo = UnitInfo {
    label: "ft",
    name: "feet",
    factor_to_base: 1.0 / 3.281,
};

const YARDS: UnitInfo = UnitInfo {
    label: "yd",
    name: "yards",
    factor_to_base: 1.0 / 1.094,
};

const MILES: UnitInfo = UnitInfo {
    label: "mi",
    name: "miles",
    factor_to_base: 1609.344,
};

impl Unit {
    /// All units in selector order
    pub const ALL: [Unit; 5] = [
        Unit::Meters,
        Unit::Kilometers,
        Unit::Feet,
        Unit::Yards,
        Unit::Miles,
    ];

    /// The unit every conversion goes through
    pub const BASE: Unit = Unit::Meters;

    pub fn info(self) -> &'static UnitInfo {
        match self {
            Unit::Meters => &METERS,
            Unit::Kilometers => &KILOMETERS,
            Unit::Feet => &FEET,
            Unit::Yards => &YARDS,
            Unit::Miles => &MILES,
        }
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn factor(self) -> f64 {
        self.info().factor_to_base
    }

    /// Position of this unit in [`Unit::ALL`]
    pub fn index(self) -> usize {
        match self {
            Unit::Meters => 0,
            Unit::Kilometers => 1,
            Unit::Feet => 2,
            Unit::Yards => 3,
            Unit::Miles => 4,
        }
    }

    /// Strict lookup by selector index
    pub fn from_index(index: usize) -> Option<Unit> {
        Self::ALL.get(index).copied()
    }

    /// Total lookup by selector value.
    ///
    /// Any selector outside `0..=4` (including negative values) resolves to
    /// [`Unit::Meters`]. This is the form's intended behaviour for stale or
    /// out-of-range picker values, not an error path.
    pub fn from_selector(selector: i64) -> Unit {
        usize::try_from(selector)
            .ok()
            .and_then(Self::from_index)
            .unwrap_or_default()
    }

    /// Labels in selector order: `["m", "km", "ft", "yd", "mi"]`
    pub fn labels() -> [&'static str; 5] {
        Self::ALL.map(Unit::label)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    /// Accepts a label ("ft") or a long name ("feet", "foot"), ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let unit = match key.as_str() {
            "m" | "meter" | "meters" | "metre" | "metres" => Unit::Meters,
            "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => Unit::Kilometers,
            "ft" | "foot" | "feet" => Unit::Feet,
            "yd" | "yard" | "yards" => Unit::Yards,
            "mi" | "mile" | "miles" => Unit::Miles,
            _ => return Err(UnitError::UnknownUnit(s.trim().to_string())),
        };
        Ok(unit)
    }
}

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One row of the unit listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitEntry {
    pub index: usize,
    pub label: &'static str,
    pub name: &'static str,
    pub factor: f64,
}

/// Every unit with its selector, label, name and factor
pub fn catalog() -> Vec<UnitEntry> {
    Unit::ALL
        .iter()
        .map(|u| UnitEntry {
            index: u.index(),
            label: u.label(),
            name: u.name(),
            factor: u.factor(),
        })
        .collect()
}

/// A magnitude tagged with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_in_selector_order() {
        assert_eq!(Unit::labels(), ["m", "km", "ft", "yd", "mi"]);
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, unit) in Unit::ALL.iter().enumerate() {
            assert_eq!(unit.index(), i);
            assert_eq!(Unit::from_index(i), Some(*unit));
        }
        assert_eq!(Unit::from_index(5), None);
    }

    #[test]
    fn test_selector_fallback_to_meters() {
        assert_eq!(Unit::from_selector(99), Unit::Meters);
        assert_eq!(Unit::from_selector(-1), Unit::Meters);
        assert_eq!(Unit::from_selector(5), Unit::Meters);
        assert_eq!(Unit::from_selector(4), Unit::Miles);
        assert_eq!(Unit::from_selector(2), Unit::Feet);
    }

    #[test]
    fn test_factors() {
        assert_eq!(Unit::BASE.factor(), 1.0);
        assert_eq!(Unit::Kilometers.factor(), 1000.0);
        assert_eq!(Unit::Feet.factor(), 1.0 / 3.281);
        assert_eq!(Unit::Yards.factor(), 1.0 / 1.094);
        assert_eq!(Unit::Miles.factor(), 1609.344);
        assert!(Unit::ALL.iter().all(|u| u.factor() > 0.0));
    }

    #[test]
    fn test_parse_labels_and_names() {
        assert_eq!("km".parse::<Unit>().unwrap(), Unit::Kilometers);
        assert_eq!("Kilometers".parse::<Unit>().unwrap(), Unit::Kilometers);
        assert_eq!(" FT ".parse::<Unit>().unwrap(), Unit::Feet);
        assert_eq!("foot".parse::<Unit>().unwrap(), Unit::Feet);
        assert_eq!("yard".parse::<Unit>().unwrap(), Unit::Yards);
        assert_eq!("mi".parse::<Unit>().unwrap(), Unit::Miles);
        assert_eq!("metres".parse::<Unit>().unwrap(), Unit::Meters);
    }

    #[test]
    fn test_parse_unknown_unit() {
        let err = "furlong".parse::<Unit>().unwrap_err();
        assert!(matches!(err, UnitError::UnknownUnit(ref s) if s == "furlong"));
    }

    #[test]
    fn test_catalog() {
        let entries = catalog();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[1].label, "km");
        assert_eq!(entries[1].name, "kilometers");
        assert_eq!(entries[4].index, 4);
        assert_eq!(entries[4].factor, 1609.344);
    }

    #[test]
    fn test_display_is_label() {
        assert_eq!(Unit::Yards.to_string(), "yd");
    }

    #[test]
    fn test_serde_uses_label() {
        let json = serde_json::to_string(&Unit::Miles).unwrap();
        assert_eq!(json, "\"mi\"");
        let unit: Unit = serde_json::from_str("\"feet\"").unwrap();
        assert_eq!(unit, Unit::Feet);
        assert!(serde_json::from_str::<Unit>("\"parsec\"").is_err());
    }
}
