/// TableKit Auxiliary Lookups
///
/// Side tables joining a record id (or foreign id held in a record field)
/// to a derived display value or count: agent id → agent name, farmer id →
/// number of open tasks. Derived sort keys and lookup search fields read
/// from them instead of capturing outer collections.
///
/// The host rebuilds a table whenever its source collection changes and
/// hands the whole `Auxiliary` to the engine as a read-only snapshot; the
/// engine never mutates it and does not detect staleness itself.

use crate::value::FieldValue;
use std::collections::HashMap;

/// A set of named `id -> value` side tables.
#[derive(Debug, Clone, Default)]
pub struct Auxiliary {
    tables: HashMap<String, HashMap<String, FieldValue>>,
}

impl Auxiliary {
    pub fn new() -> Self {
        Auxiliary::default()
    }

    /// Replace the named table with a freshly built snapshot.
    pub fn set_table(
        &mut self,
        name: impl Into<String>,
        entries: impl IntoIterator<Item = (String, FieldValue)>,
    ) {
        self.tables.insert(name.into(), entries.into_iter().collect());
    }

    /// Look up one id in the named table. An unknown table or id resolves
    /// to `Null`, matching the engine-wide missing-data rule.
    pub fn lookup(&self, table: &str, id: &str) -> FieldValue {
        self.tables
            .get(table)
            .and_then(|t| t.get(id))
            .cloned()
            .unwrap_or(FieldValue::Null)
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }
}
