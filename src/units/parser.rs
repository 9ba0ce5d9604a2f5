use crate::units::detector::split_quantity;
use crate::units::error::UnitError;
use crate::units::types::{Quantity, Unit};
use tracing::debug;

/// Parse raw input text as a finite decimal number.
///
/// The text is taken as typed: surrounding whitespace makes it malformed, as
/// do empty text and values that parse to infinity or NaN.
pub fn parse_number(text: &str) -> Result<f64, UnitError> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(UnitError::InvalidNumber(text.to_string())),
    }
}

/// Parse raw input text, falling back to `0.0` when it is not a number
pub fn parse_number_or_zero(text: &str) -> f64 {
    parse_number(text).unwrap_or_else(|e| {
        debug!(error = %e, "input is not a number, using 0");
        0.0
    })
}

/// Parse a quantity string such as "3.5 km" or "12 feet"
pub fn parse_quantity(text: &str) -> Result<Quantity, UnitError> {
    let (number, unit) =
        split_quantity(text).ok_or_else(|| UnitError::MalformedQuantity(text.trim().to_string()))?;
    let value = parse_number(number)?;
    let unit: Unit = unit.parse()?;
    Ok(Quantity::new(value, unit))
}
