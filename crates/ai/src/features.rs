use serde_json::Value as JsonValue;

use crate::result::InputError;

/// Column order the model was trained against.
pub const FEATURE_COLUMNS: [&str; 3] = ["value", "gas_limit", "input_data_size"];

/// Single-row feature vector for one transaction.
///
/// Values are stored in [`FEATURE_COLUMNS`] order. The vector is built fresh per
/// request and never validated against a schema beyond "three finite numbers".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    values: [f64; 3],
}

impl FeatureVector {
    pub fn new(value: f64, gas_limit: f64, input_data_size: f64) -> Self {
        Self {
            values: [value, gas_limit, input_data_size],
        }
    }

    /// Parse a raw request body, ignoring whatever content type was declared.
    pub fn from_slice(body: &[u8]) -> Result<Self, InputError> {
        let json: JsonValue =
            serde_json::from_slice(body).map_err(|e| InputError::MalformedJson(e.to_string()))?;
        Self::from_json(&json)
    }

    /// Build the vector from a JSON object.
    ///
    /// Extra keys are ignored. Numbers, numeric strings and booleans are accepted
    /// for each column; anything else is rejected.
    pub fn from_json(json: &JsonValue) -> Result<Self, InputError> {
        let object = json
            .as_object()
            .ok_or_else(|| InputError::NotAnObject(json_kind(json)))?;

        let mut values = [0.0; 3];
        for (slot, column) in values.iter_mut().zip(FEATURE_COLUMNS) {
            let raw = object
                .get(column)
                .ok_or(InputError::MissingFeature(column))?;
            let x = coerce(column, raw)?;
            if !x.is_finite() {
                return Err(InputError::NonFinite(column));
            }
            *slot = x;
        }

        Ok(Self { values })
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &FEATURE_COLUMNS
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn value(&self) -> f64 {
        self.values[0]
    }

    pub fn gas_limit(&self) -> f64 {
        self.values[1]
    }

    pub fn input_data_size(&self) -> f64 {
        self.values[2]
    }
}

fn coerce(column: &'static str, raw: &JsonValue) -> Result<f64, InputError> {
    match raw {
        JsonValue::Null => Err(InputError::MissingFeature(column)),
        JsonValue::Number(n) => n.as_f64().ok_or_else(|| InputError::NotNumeric {
            column,
            found: n.to_string(),
        }),
        // Upstream bots send wei amounts as decimal strings.
        JsonValue::String(s) => s.trim().parse::<f64>().map_err(|_| InputError::NotNumeric {
            column,
            found: format!("{s:?}"),
        }),
        JsonValue::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        other => Err(InputError::NotNumeric {
            column,
            found: json_kind(other).to_string(),
        }),
    }
}

fn json_kind(json: &JsonValue) -> &'static str {
    match json {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
