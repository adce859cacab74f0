/// TableKit Sorting
///
/// The comparator registry resolves a sort key name to a comparison over
/// records. A key is either a direct field name or a registered *derived*
/// key: a named function of the record and the caller-supplied auxiliary
/// lookups (a joined count, a concatenation of two fields).
///
/// Comparison semantics, uniform across key types:
///
/// - null/missing values sort last regardless of direction
/// - strings compare case-insensitively (Unicode-aware lowercasing)
/// - numbers compare numerically, integers and floats cross-comparing
/// - booleans compare with `false < true`
/// - mixed types fall back to a deterministic type-rank ordering
///
/// Direction is applied by reversing the base ascending ordering at exactly
/// one point in `ComparatorRegistry::compare`, so direction handling cannot
/// diverge per key type.

use crate::auxiliary::Auxiliary;
use crate::record::Record;
use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Sort direction for the single active sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The active sort: exactly one key and a direction (no multi-column sort).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn ascending(key: impl Into<String>) -> Self {
        SortState {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// A repeated request on the current key toggles the direction; any
    /// other key resets to ascending.
    pub fn request(&mut self, key: &str) {
        if self.key == key {
            self.direction = self.direction.toggled();
        } else {
            self.key = key.to_string();
            self.direction = SortDirection::Ascending;
        }
    }
}

/// A derived sort key: computes a comparable value from the record and the
/// auxiliary lookups passed in at projection time. No outer-collection
/// capture; the side tables arrive explicitly.
pub type DerivedKeyFn = Box<dyn Fn(&Record, &Auxiliary) -> FieldValue + Send + Sync>;

/// Resolves sort key names to comparisons. Unregistered names are treated
/// as direct field names; a field absent from a record compares as null.
#[derive(Default)]
pub struct ComparatorRegistry {
    derived: HashMap<String, DerivedKeyFn>,
}

impl ComparatorRegistry {
    pub fn new() -> Self {
        ComparatorRegistry::default()
    }

    /// Register a derived key under a name. Re-registering replaces the
    /// previous function.
    pub fn register_derived<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&Record, &Auxiliary) -> FieldValue + Send + Sync + 'static,
    {
        self.derived.insert(name.into(), Box::new(f));
    }

    pub fn is_derived(&self, key: &str) -> bool {
        self.derived.contains_key(key)
    }

    /// The comparable value a record exposes for a key: derived function if
    /// registered, otherwise the named field (null when missing).
    pub fn key_value(&self, key: &str, record: &Record, aux: &Auxiliary) -> FieldValue {
        match self.derived.get(key) {
            Some(f) => f(record, aux),
            None => record.get(key),
        }
    }

    /// Compare two records under a sort state. Null placement is decided
    /// before the direction is applied, so nulls stay last when descending.
    pub fn compare(
        &self,
        state: &SortState,
        a: &Record,
        b: &Record,
        aux: &Auxiliary,
    ) -> Ordering {
        let va = self.key_value(&state.key, a, aux);
        let vb = self.key_value(&state.key, b, aux);

        let ordered = match (va.is_null(), vb.is_null()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => compare_values(&va, &vb),
        };

        // The single direction-application point shared by all key types.
        match state.direction {
            SortDirection::Ascending => ordered,
            SortDirection::Descending => ordered.reverse(),
        }
    }
}

/// Base ascending comparison of two non-null values.
pub fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a, b) {
        (FieldValue::Str(x), FieldValue::Str(y)) => {
            let folded = x.to_lowercase().cmp(&y.to_lowercase());
            // Case-identical values still need a deterministic order.
            if folded == Ordering::Equal {
                x.cmp(y)
            } else {
                folded
            }
        }
        (FieldValue::Bool(x), FieldValue::Bool(y)) => x.cmp(y),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => compare_f64(x, y),
            // Mixed, incomparable types: deterministic rank order.
            _ => type_rank(a).cmp(&type_rank(b)),
        },
    }
}

/// Total order over f64: NaN equals itself and sorts after real numbers,
/// keeping the overall sort total.
fn compare_f64(x: f64, y: f64) -> Ordering {
    match x.partial_cmp(&y) {
        Some(ord) => ord,
        None => match (x.is_nan(), y.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => Ordering::Equal,
        },
    }
}

fn type_rank(v: &FieldValue) -> u8 {
    match v {
        FieldValue::Bool(_) => 0,
        FieldValue::Int(_) | FieldValue::Float(_) => 1,
        FieldValue::Str(_) => 2,
        FieldValue::Null => 3,
    }
}
