/// TableKit Export Rows
///
/// The engine's whole contract with export collaborators (CSV, Excel, PDF
/// generators, AI-insight prompts): hand over the already projected or
/// selected records as plain field-mappings. Formatting and file I/O live
/// with the collaborator.

use crate::record::Record;
use crate::selection::Selection;
use serde_json::{Map, Value};

/// Flatten a projected view into JSON row maps, `id` included. Each map
/// keeps its keys in alphabetical order (`serde_json::Map` is ordered by
/// key), so repeated exports of the same data are identical byte for byte.
pub fn export_rows(view: &[&Record]) -> Vec<Map<String, Value>> {
    view.iter().map(|r| export_row(r)).collect()
}

/// The selected subset of a collection, in collection order.
pub fn export_selected(records: &[Record], selection: &Selection) -> Vec<Map<String, Value>> {
    records
        .iter()
        .filter(|r| selection.contains(r.id()))
        .map(export_row)
        .collect()
}

fn export_row(record: &Record) -> Map<String, Value> {
    let mut row = Map::new();
    row.insert("id".to_string(), Value::String(record.id().to_string()));
    for name in record.field_names() {
        row.insert(name.to_string(), record.get(name).into());
    }
    row
}
