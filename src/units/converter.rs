use crate::units::types::Unit;

/// Express `value` of `unit` in meters
pub fn to_base(value: f64, unit: Unit) -> f64 {
    value * unit.factor()
}

/// Express `value` meters in `unit`
pub fn from_base(value: f64, unit: Unit) -> f64 {
    value / unit.factor()
}

/// Convert a magnitude between two units by way of meters.
///
/// Pure and total over the five units. Converting a unit to itself returns
/// the input up to floating-point rounding, and the result is monotonic in
/// `value` because every factor is positive.
pub fn convert(value: f64, from: Unit, to: Unit) -> f64 {
    from_base(to_base(value, from), to)
}

/// The value expressed in every unit, in selector order
pub fn convert_all(value: f64, from: Unit) -> Vec<(Unit, f64)> {
    Unit::ALL
        .iter()
        .map(|&to| (to, convert(value, from, to)))
        .collect()
}
