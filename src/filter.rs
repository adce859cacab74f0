/// TableKit Filtering
///
/// A view's filter is the AND of one free-text search and any number of
/// categorical dimensions.
///
/// Free-text search is an AND-of-words, OR-of-fields containment test: the
/// query is lower-cased and split on whitespace, and a record matches only
/// if every word is a substring of the lower-cased, space-joined
/// concatenation of the view's searchable fields. Searchable fields may be
/// direct record fields or values resolved through an auxiliary lookup
/// (an assigned agent's display name rather than their id).
///
/// Categorical dimensions compare a record field for exact equality against
/// the selected value; the `ALL` sentinel contributes no constraint.

use crate::auxiliary::Auxiliary;
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentinel category value meaning "no constraint".
pub const ALL: &str = "All";

/// One searchable field of a free-text filter.
#[derive(Debug, Clone)]
pub enum SearchField {
    /// A record field searched by its own value.
    Direct(String),
    /// A record field holding a foreign id, searched by the display value
    /// the auxiliary table maps that id to.
    Lookup { id_field: String, table: String },
}

/// One categorical filter dimension: a name for the control, the record
/// field it constrains, and the valid values (for the host's dropdown).
#[derive(Debug, Clone)]
pub struct CategoryDef {
    name: String,
    field: String,
    values: Vec<String>,
}

impl CategoryDef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Per-view filter configuration, supplied once at setup.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    search_fields: Vec<SearchField>,
    categories: Vec<CategoryDef>,
}

impl FilterConfig {
    pub fn new() -> Self {
        FilterConfig::default()
    }

    /// Add a direct record field to the free-text search.
    pub fn search_field(mut self, field: impl Into<String>) -> Self {
        self.search_fields.push(SearchField::Direct(field.into()));
        self
    }

    /// Add a lookup-resolved field to the free-text search.
    pub fn search_lookup(
        mut self,
        id_field: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        self.search_fields.push(SearchField::Lookup {
            id_field: id_field.into(),
            table: table.into(),
        });
        self
    }

    /// Add a categorical dimension constraining `field`.
    pub fn category(
        mut self,
        name: impl Into<String>,
        field: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.categories.push(CategoryDef {
            name: name.into(),
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn categories(&self) -> &[CategoryDef] {
        &self.categories
    }

    pub fn category_def(&self, name: &str) -> Option<&CategoryDef> {
        self.categories.iter().find(|c| c.name == name)
    }
}

/// The current filter values: free-text query plus one selection per
/// categorical dimension. Unset dimensions behave as `ALL`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    search: String,
    categories: HashMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        FilterState::default()
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_category(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.categories.insert(name.into(), value.into());
    }

    /// The selected value for a dimension, `ALL` when untouched.
    pub fn category(&self, name: &str) -> &str {
        self.categories.get(name).map(String::as_str).unwrap_or(ALL)
    }

    /// Back to defaults: empty search, every dimension at `ALL`.
    pub fn reset(&mut self) {
        self.search.clear();
        self.categories.clear();
    }

    /// True when no dimension and no search constrains the view.
    pub fn is_unconstrained(&self) -> bool {
        self.search.trim().is_empty() && self.categories.values().all(|v| v == ALL)
    }
}

/// True iff the record satisfies the free-text predicate and every active
/// categorical predicate.
pub fn matches(
    record: &Record,
    config: &FilterConfig,
    state: &FilterState,
    aux: &Auxiliary,
) -> bool {
    matches_search(record, config, state, aux) && matches_categories(record, config, state)
}

fn matches_search(
    record: &Record,
    config: &FilterConfig,
    state: &FilterState,
    aux: &Auxiliary,
) -> bool {
    let query = state.search.to_lowercase();
    let words: Vec<&str> = query.split_whitespace().collect();
    if words.is_empty() {
        return true;
    }

    let haystack = config
        .search_fields
        .iter()
        .map(|f| resolve_search_field(record, f, aux))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    words.iter().all(|w| haystack.contains(w))
}

fn resolve_search_field(record: &Record, field: &SearchField, aux: &Auxiliary) -> String {
    match field {
        SearchField::Direct(name) => record.get(name).search_text(),
        SearchField::Lookup { id_field, table } => {
            let id = record.get(id_field).search_text();
            if id.is_empty() {
                String::new()
            } else {
                aux.lookup(table, &id).search_text()
            }
        }
    }
}

fn matches_categories(record: &Record, config: &FilterConfig, state: &FilterState) -> bool {
    config.categories.iter().all(|dim| {
        let selected = state.category(&dim.name);
        // The sentinel is always satisfied. Otherwise the record field is
        // compared to the selected value, never to itself.
        selected == ALL || record.get(&dim.field).search_text() == selected
    })
}
