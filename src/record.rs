/// TableKit Record
///
/// A record is a unique, stable `id` plus an opaque mapping from field name
/// to scalar value. The engine is generic over record shape: beyond the id
/// it never assumes a schema, and a missing field reads as `Null`.
///
/// # Examples
///
/// ```
/// use tablekit::{FieldValue, Record};
///
/// let farmer = Record::new("f-17")
///     .with_field("name", "Venkata Rao")
///     .with_field("status", "Active")
///     .with_field("age", 52i64);
///
/// assert_eq!(farmer.get("status").as_str(), Some("Active"));
/// assert!(farmer.get("no_such_field").is_null());
/// ```

use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single row of a record collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    id: String,
    fields: HashMap<String, FieldValue>,
}

impl Record {
    pub fn new(id: impl Into<String>) -> Self {
        Record {
            id: id.into(),
            fields: HashMap::new(),
        }
    }

    /// Builder-style field assignment, for constructing records inline.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Field lookup. Missing fields resolve to `Null` rather than erroring,
    /// so an unknown sort or filter key can never abort rendering a view.
    pub fn get(&self, name: &str) -> FieldValue {
        self.fields.get(name).cloned().unwrap_or(FieldValue::Null)
    }

    pub fn get_ref(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn remove_field(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|k| k.as_str())
    }

    pub fn fields(&self) -> &HashMap<String, FieldValue> {
        &self.fields
    }
}
