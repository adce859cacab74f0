/// TableKit Field Values
///
/// A `FieldValue` is the scalar stored in a record field: string, integer,
/// float, boolean, or null. Date values are carried as RFC 3339 strings,
/// which sort correctly under plain string comparison.
///
/// Missing fields resolve to `Null` everywhere in the engine, so view code
/// never has to guard against absent keys before sorting or filtering.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Scalar value held by a record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of the value: integers and floats both surface as f64
    /// so the two can be compared against each other.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(v) => Some(*v as f64),
            FieldValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Text rendering used by the free-text search predicate. Null renders
    /// as the empty string so it can never satisfy a search word.
    pub fn search_text(&self) -> String {
        match self {
            FieldValue::Str(v) => v.clone(),
            FieldValue::Int(v) => v.to_string(),
            FieldValue::Float(v) => v.to_string(),
            FieldValue::Bool(v) => v.to_string(),
            FieldValue::Null => String::new(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Str(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Str(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<FieldValue> for Value {
    fn from(v: FieldValue) -> Self {
        match v {
            FieldValue::Str(s) => Value::String(s),
            FieldValue::Int(i) => Value::from(i),
            FieldValue::Float(f) => Value::from(f),
            FieldValue::Bool(b) => Value::Bool(b),
            FieldValue::Null => Value::Null,
        }
    }
}

impl From<&Value> for FieldValue {
    /// JSON arrays and objects are not scalar; they collapse to `Null`
    /// rather than failing, since the engine only sorts and filters scalars.
    fn from(v: &Value) -> Self {
        match v {
            Value::String(s) => FieldValue::Str(s.clone()),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else {
                    FieldValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            Value::Bool(b) => FieldValue::Bool(*b),
            _ => FieldValue::Null,
        }
    }
}
