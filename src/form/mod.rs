pub mod session;
pub mod state;
pub mod validation;

pub use session::Session;
pub use state::{Conversion, ConversionForm, InputPolicy};
pub use validation::{FormField, IssueSeverity, ValidationIssue, ValidationResult};
