use crate::form::{ConversionForm, InputPolicy};
use crate::units::{Unit, DEFAULT_PRECISION, MAX_PRECISION};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    // Initial picker selections and input handling
    #[serde(default)]
    pub form: FormConfig,

    // Output formatting
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FormConfig {
    #[serde(default)]
    pub input_unit: Unit,
    #[serde(default)]
    pub output_unit: Unit,
    #[serde(default)]
    pub policy: InputPolicy,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DisplayConfig {
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
        }
    }
}

fn default_precision() -> usize {
    DEFAULT_PRECISION
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content)
    }

    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.precision > MAX_PRECISION {
            return Err(ConfigError::Invalid(format!(
                "display.precision must be at most {}, got {}",
                MAX_PRECISION, self.display.precision
            )));
        }
        Ok(())
    }

    /// A form seeded with the configured defaults
    pub fn new_form(&self) -> ConversionForm {
        ConversionForm::new()
            .with_units(self.form.input_unit, self.form.output_unit)
            .with_precision(self.display.precision)
            .with_policy(self.form.policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::load_from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.display.precision, 4);
        assert_eq!(config.form.input_unit, Unit::Meters);
        assert_eq!(config.form.policy, InputPolicy::Lenient);
    }

    #[test]
    fn test_full_config() {
        let config = Config::load_from_str(
            r#"
[form]
input_unit = "km"
output_unit = "miles"
policy = "strict"

[display]
precision = 2
"#,
        )
        .unwrap();

        assert_eq!(config.form.input_unit, Unit::Kilometers);
        assert_eq!(config.form.output_unit, Unit::Miles);
        assert_eq!(config.form.policy, InputPolicy::Strict);

        let mut form = config.new_form();
        assert_eq!(form.input_unit, 1);
        assert_eq!(form.output_unit, 4);
        form.set_input_text("1.609344");
        assert_eq!(form.formatted_output(), "1.00");
    }

    #[test]
    fn test_unknown_unit_is_parse_error() {
        let err = Config::load_from_str("[form]\ninput_unit = \"league\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_precision_limit() {
        let err = Config::load_from_str("[display]\nprecision = 40\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = Config::load_from_file("/nonexistent/distconv.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
