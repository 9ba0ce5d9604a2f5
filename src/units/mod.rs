// Linear length units and conversion between them via meters

pub mod converter;
pub mod detector;
pub mod error;
pub mod formatter;
pub mod parser;
pub mod types;

pub use converter::{convert, convert_all, from_base, to_base};
pub use detector::looks_like_quantity;
pub use error::UnitError;
pub use formatter::{
    conversion_table, format_quantity, format_value, TableRow, DEFAULT_PRECISION,
    MAX_PRECISION,
};
pub use parser::{parse_number, parse_number_or_zero, parse_quantity};
pub use types::{catalog, Quantity, Unit, UnitEntry, UnitInfo};
