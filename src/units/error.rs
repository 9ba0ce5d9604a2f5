use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),
    #[error("Invalid number: '{0}'")]
    InvalidNumber(String),
    #[error("Malformed quantity: '{0}' (expected '<number> <unit>', e.g. '3.5 km')")]
    MalformedQuantity(String),
    #[error("Unit selector {0} is out of range (0-4)")]
    SelectorOutOfRange(i64),
}
