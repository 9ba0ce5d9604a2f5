use crate::form::validation::{FormField, IssueSeverity, ValidationResult};
use crate::units::{self, Unit, UnitError, DEFAULT_PRECISION, MAX_PRECISION};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// How the form treats input it cannot use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
    /// Unparseable text counts as 0 and out-of-range selectors as meters.
    /// The output is always defined.
    #[default]
    Lenient,
    /// The same situations are reported as validation errors
    Strict,
}

impl InputPolicy {
    fn severity(self) -> IssueSeverity {
        match self {
            InputPolicy::Lenient => IssueSeverity::Warning,
            InputPolicy::Strict => IssueSeverity::Error,
        }
    }
}

/// One evaluated conversion, as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub input: f64,
    pub from: Unit,
    pub to: Unit,
    pub output: f64,
    pub formatted: String,
}

/// State of the conversion screen: two unit pickers and a text field.
///
/// Nothing derived is stored; every accessor recomputes from the current
/// selectors and text.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionForm {
    pub input_unit: i64,
    pub output_unit: i64,
    pub input_text: String,
    pub precision: usize,
    pub policy: InputPolicy,
}

impl Default for ConversionForm {
    fn default() -> Self {
        Self {
            input_unit: 0,
            output_unit: 0,
            input_text: String::new(),
            precision: DEFAULT_PRECISION,
            policy: InputPolicy::default(),
        }
    }
}

impl ConversionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_units(mut self, input: Unit, output: Unit) -> Self {
        self.input_unit = input.index() as i64;
        self.output_unit = output.index() as i64;
        self
    }

    /// Set the displayed fractional digits, capped at [`MAX_PRECISION`]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision.min(MAX_PRECISION);
        self
    }

    pub fn with_policy(mut self, policy: InputPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn set_input_unit(&mut self, selector: i64) {
        self.input_unit = selector;
    }

    pub fn set_output_unit(&mut self, selector: i64) {
        self.output_unit = selector;
    }

    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
    }

    /// Exchange the input and output selectors
    pub fn swap_units(&mut self) {
        std::mem::swap(&mut self.input_unit, &mut self.output_unit);
    }

    pub fn input(&self) -> Unit {
        Unit::from_selector(self.input_unit)
    }

    pub fn output(&self) -> Unit {
        Unit::from_selector(self.output_unit)
    }

    pub fn input_number(&self) -> f64 {
        units::parse_number_or_zero(&self.input_text)
    }

    pub fn output_number(&self) -> f64 {
        let value = units::convert(self.input_number(), self.input(), self.output());
        trace!(
            input = %self.input_text,
            from = %self.input(),
            to = %self.output(),
            value,
            "recomputed output"
        );
        value
    }

    pub fn formatted_output(&self) -> String {
        units::format_value(self.output_number(), self.precision)
    }

    /// Snapshot of the current conversion
    pub fn conversion(&self) -> Conversion {
        let output = self.output_number();
        Conversion {
            input: self.input_number(),
            from: self.input(),
            to: self.output(),
            output,
            formatted: units::format_value(output, self.precision),
        }
    }

    /// Report every input the form had to substitute a default for
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::new();
        let severity = self.policy.severity();

        if let Err(e) = units::parse_number(&self.input_text) {
            result.push(severity, FormField::InputText, format!("{}; using 0", e));
        }

        for (selector, field) in [
            (self.input_unit, FormField::InputUnit),
            (self.output_unit, FormField::OutputUnit),
        ] {
            if usize::try_from(selector)
                .ok()
                .and_then(Unit::from_index)
                .is_none()
            {
                result.push(
                    severity,
                    field,
                    format!("{}; using meters", UnitError::SelectorOutOfRange(selector)),
                );
            }
        }

        result
    }

    /// Evaluate the form under its policy.
    ///
    /// Lenient forms always succeed. Strict forms fail with the collected
    /// validation errors.
    pub fn evaluate(&self) -> Result<Conversion, ValidationResult> {
        let validation = self.validate();
        if !validation.is_valid() {
            return Err(validation);
        }
        if validation.has_issues() {
            debug!(issues = %validation, "form used fallback values");
        }
        Ok(self.conversion())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_outputs_zero() {
        let form = ConversionForm::new();
        assert_eq!(form.input(), Unit::Meters);
        assert_eq!(form.output(), Unit::Meters);
        assert_eq!(form.output_number(), 0.0);
        assert_eq!(form.formatted_output(), "0.0000");
    }

    #[test]
    fn test_meters_to_feet() {
        let mut form = ConversionForm::new().with_units(Unit::Meters, Unit::Feet);
        form.set_input_text("1");
        assert_eq!(form.formatted_output(), "3.2810");
    }

    #[test]
    fn test_recomputes_after_every_change() {
        let mut form = ConversionForm::new();
        form.set_input_text("2");
        form.set_input_unit(1);
        assert_eq!(form.formatted_output(), "2000.0000");

        form.set_output_unit(1);
        assert_eq!(form.formatted_output(), "2.0000");

        form.set_input_text("abc");
        assert_eq!(form.formatted_output(), "0.0000");
    }

    #[test]
    fn test_invalid_selector_resolves_to_meters() {
        let mut form = ConversionForm::new();
        form.set_input_unit(99);
        form.set_output_unit(99);
        form.set_input_text("5");
        assert_eq!(form.input(), Unit::Meters);
        assert_eq!(form.output(), Unit::Meters);
        assert_eq!(form.formatted_output(), "5.0000");
    }

    #[test]
    fn test_input_text_is_not_trimmed() {
        let mut form = ConversionForm::new();
        form.set_input_text(" 1");
        assert_eq!(form.formatted_output(), "0.0000");
        form.set_input_text("1 ");
        assert_eq!(form.formatted_output(), "0.0000");
        form.set_input_text("1");
        assert_eq!(form.formatted_output(), "1.0000");

        let strict = form.clone().with_policy(InputPolicy::Strict);
        let mut padded = strict.clone();
        padded.set_input_text(" 1");
        assert!(padded.evaluate().is_err());
        assert!(strict.evaluate().is_ok());
    }

    #[test]
    fn test_precision_is_capped() {
        let mut form = ConversionForm::new().with_precision(70_000);
        assert_eq!(form.precision, MAX_PRECISION);
        form.set_input_text("1");
        assert_eq!(form.formatted_output(), "1.000000000000");
    }

    #[test]
    fn test_swap_units() {
        let mut form = ConversionForm::new().with_units(Unit::Miles, Unit::Meters);
        form.set_input_text("1609.344");
        form.swap_units();
        assert_eq!(form.input(), Unit::Meters);
        assert_eq!(form.output(), Unit::Miles);
        assert_eq!(form.formatted_output(), "1.0000");
    }

    #[test]
    fn test_lenient_evaluate_never_fails() {
        let mut form = ConversionForm::new();
        form.set_input_unit(-3);
        form.set_input_text("");
        let validation = form.validate();
        assert!(validation.is_valid());
        assert_eq!(validation.warnings().count(), 2);

        let conversion = form.evaluate().unwrap();
        assert_eq!(conversion.formatted, "0.0000");
        assert_eq!(conversion.from, Unit::Meters);
    }

    #[test]
    fn test_strict_evaluate_reports_errors() {
        let mut form = ConversionForm::new().with_policy(InputPolicy::Strict);
        form.set_input_text("twelve");
        form.set_output_unit(7);

        let errors = form.evaluate().unwrap_err();
        let fields: Vec<FormField> = errors.errors().map(|i| i.field).collect();
        assert_eq!(fields, vec![FormField::InputText, FormField::OutputUnit]);
    }

    #[test]
    fn test_strict_evaluate_accepts_valid_input() {
        let mut form = ConversionForm::new()
            .with_policy(InputPolicy::Strict)
            .with_units(Unit::Kilometers, Unit::Meters);
        form.set_input_text("1");
        let conversion = form.evaluate().unwrap();
        assert_eq!(conversion.output, 1000.0);
        assert_eq!(conversion.formatted, "1000.0000");
    }

    #[test]
    fn test_conversion_serializes_labels() {
        let mut form = ConversionForm::new().with_units(Unit::Kilometers, Unit::Meters);
        form.set_input_text("1");
        let json = serde_json::to_value(form.conversion()).unwrap();
        assert_eq!(json["from"], "km");
        assert_eq!(json["to"], "m");
        assert_eq!(json["formatted"], "1000.0000");
    }
}
