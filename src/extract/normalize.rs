//! Missing-value normalization
//!
//! Artist attributes are checked for "NaN-ness" before loading. Only numbers
//! can be tested; anything else is passed through as-is.

use serde_json::Value;

/// Classification of a record field ahead of NaN coercion
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Absent key, JSON null, or a NaN number
    Missing,
    /// A value that cannot be NaN-tested (string, bool, array, object)
    WrongType(&'a Value),
    /// A number that is not NaN
    Present(&'a Value),
}

impl<'a> FieldValue<'a> {
    /// Classify an optional field value
    pub fn classify(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => FieldValue::Missing,
            Some(v @ Value::Number(n)) => {
                if n.as_f64().is_some_and(f64::is_nan) {
                    FieldValue::Missing
                } else {
                    FieldValue::Present(v)
                }
            }
            Some(v) => FieldValue::WrongType(v),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// Text to store: empty for missing values, the value itself otherwise
    pub fn into_text(self) -> String {
        match self {
            FieldValue::Missing => String::new(),
            FieldValue::Present(v) | FieldValue::WrongType(v) => value_to_text(v),
        }
    }
}

/// Render a JSON value as column text, without quoting strings
fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Normalize one field of a record object
pub(crate) fn normalize_field(record: &Value, field: &str) -> String {
    FieldValue::classify(record.get(field)).into_text()
}
