// WebAssembly bindings for the distance converter
use crate::form::ConversionForm;
use crate::units::{self, Unit};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct ConverterWasm {
    precision: usize,
}

impl Default for ConverterWasm {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_unit(label: &str) -> Result<Unit, JsValue> {
    label
        .parse::<Unit>()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
impl ConverterWasm {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            precision: units::DEFAULT_PRECISION,
        }
    }

    /// Convert raw input text between two units given by label or name
    /// Unparseable text counts as 0; returns the formatted output
    #[wasm_bindgen]
    pub fn convert(&self, text: &str, from: &str, to: &str) -> Result<String, JsValue> {
        let form = ConversionForm::new()
            .with_units(parse_unit(from)?, parse_unit(to)?)
            .with_precision(self.precision);
        Ok(self.with_text(form, text).formatted_output())
    }

    /// Convert using picker selectors; out-of-range selectors mean meters
    #[wasm_bindgen]
    pub fn convert_selectors(&self, text: &str, input_selector: i32, output_selector: i32) -> String {
        let mut form = ConversionForm::new().with_precision(self.precision);
        form.set_input_unit(input_selector.into());
        form.set_output_unit(output_selector.into());
        self.with_text(form, text).formatted_output()
    }

    /// Returns JSON array of units in selector order
    #[wasm_bindgen]
    pub fn units_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&units::catalog())
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize units: {}", e)))
    }

    /// Returns JSON array with the input expressed in every unit
    #[wasm_bindgen]
    pub fn table_json(&self, text: &str, from: &str) -> Result<String, JsValue> {
        let from = parse_unit(from)?;
        let value = units::parse_number_or_zero(text);
        let rows = units::conversion_table(value, from, self.precision);

        serde_json::to_string(&rows)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize table: {}", e)))
    }
}

impl ConverterWasm {
    fn with_text(&self, mut form: ConversionForm, text: &str) -> ConversionForm {
        form.set_input_text(text);
        form
    }
}
