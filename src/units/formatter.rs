use crate::units::converter::convert_all;
use crate::units::types::Unit;
use serde::Serialize;

/// Digits after the decimal point shown by the form
pub const DEFAULT_PRECISION: usize = 4;

/// Largest number of fractional digits the display accepts
pub const MAX_PRECISION: usize = 12;

/// Format a value in fixed-point notation with exactly `precision` fractional digits.
///
/// `precision` is capped at [`MAX_PRECISION`]. Values that round to zero print
/// without a sign, so `-0.00001` becomes "0.0000".
pub fn format_value(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*}", precision.min(MAX_PRECISION), value);
    if formatted.starts_with('-') && formatted[1..].chars().all(|c| c == '0' || c == '.') {
        formatted[1..].to_string()
    } else {
        formatted
    }
}

/// Format a value followed by its unit label, e.g. "3.2810 ft"
pub fn format_quantity(value: f64, unit: Unit, precision: usize) -> String {
    format!("{} {}", format_value(value, precision), unit.label())
}

/// A value expressed in one unit, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub unit: Unit,
    pub value: f64,
    pub formatted: String,
}

/// The value expressed in every unit, formatted, in selector order
pub fn conversion_table(value: f64, from: Unit, precision: usize) -> Vec<TableRow> {
    convert_all(value, from)
        .into_iter()
        .map(|(unit, value)| TableRow {
            unit,
            value,
            formatted: format_value(value, precision),
        })
        .collect()
}
