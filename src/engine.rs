/// TableKit Grid Engine
///
/// One `GridEngine` per record-listing view. It owns the view's filter and
/// sort state, the persistent selection, and the bulk mutator, and exposes
/// the derived outputs a host needs to render: the ordered projection, the
/// tri-state "select all" status, and the selected ids.
///
/// The record collection itself stays with the caller; the engine receives
/// it by reference on every read and hands back a replacement collection on
/// bulk mutation. Filter and sort changes never touch the selection — the
/// per-view state machine is `Idle(empty selection)` to `Selecting` and
/// back to `Idle` only through an explicit clear or a completed bulk
/// action.

use crate::auxiliary::Auxiliary;
use crate::bulk::{BulkError, BulkMutator, BulkOp};
use crate::filter::{FilterConfig, FilterState};
use crate::projection::{self, project};
use crate::record::Record;
use crate::selection::{Selection, SelectionStatus};
use crate::sort::{ComparatorRegistry, SortState};
use chrono::{DateTime, Utc};
use log::{debug, warn};

/// Per-view engine: filter + sort state, selection, bulk transaction.
pub struct GridEngine {
    config: FilterConfig,
    registry: ComparatorRegistry,
    mutator: BulkMutator,
    filter: FilterState,
    sort: Option<SortState>,
    selection: Selection,
}

impl GridEngine {
    pub fn new(config: FilterConfig, registry: ComparatorRegistry) -> Self {
        GridEngine {
            config,
            registry,
            mutator: BulkMutator::new(),
            filter: FilterState::new(),
            sort: None,
            selection: Selection::new(),
        }
    }

    pub fn with_mutator(mut self, mutator: BulkMutator) -> Self {
        self.mutator = mutator;
        self
    }

    /// Start with a default sort instead of collection order.
    pub fn with_initial_sort(mut self, sort: SortState) -> Self {
        self.sort = Some(sort);
        self
    }

    // ---- filter state ----

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.filter.set_search(query);
    }

    pub fn set_category(&mut self, name: &str, value: impl Into<String>) {
        if self.config.category_def(name).is_none() {
            warn!("unknown filter dimension '{}'", name);
        }
        self.filter.set_category(name, value);
    }

    pub fn reset_filters(&mut self) {
        self.filter.reset();
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    // ---- sort state ----

    /// A header click: same key toggles direction, a new key resets to
    /// ascending.
    pub fn request_sort(&mut self, key: &str) {
        match self.sort.as_mut() {
            Some(state) => state.request(key),
            None => self.sort = Some(SortState::ascending(key)),
        }
        if let Some(state) = &self.sort {
            debug!("sort: {} {:?}", state.key, state.direction);
        }
    }

    pub fn sort_state(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    // ---- derived outputs ----

    /// The ordered, filtered view. Pure; recomputed on every call.
    pub fn projection<'a>(&self, records: &'a [Record], aux: &Auxiliary) -> Vec<&'a Record> {
        project(
            records,
            &self.config,
            &self.filter,
            self.sort.as_ref(),
            &self.registry,
            aux,
        )
    }

    pub fn visible_ids(&self, records: &[Record], aux: &Auxiliary) -> Vec<String> {
        projection::visible_ids(&self.projection(records, aux))
    }

    /// Tri-state status of the current projection, for the "select all"
    /// control.
    pub fn selection_status(&self, records: &[Record], aux: &Auxiliary) -> SelectionStatus {
        let visible = self.visible_ids(records, aux);
        self.selection.status(&visible)
    }

    // ---- selection ----

    pub fn toggle_row(&mut self, id: &str) {
        self.selection.toggle(id);
    }

    /// Check or uncheck every currently visible row.
    pub fn select_all_visible(&mut self, records: &[Record], aux: &Auxiliary, checked: bool) {
        let visible = self.visible_ids(records, aux);
        self.selection.set_visible(visible, checked);
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.selection.ids().map(str::to_string).collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    // ---- bulk transaction ----

    /// Apply a bulk operation to the selection with the current wall-clock
    /// time. See [`GridEngine::apply_bulk_at`].
    pub fn apply_bulk(
        &mut self,
        records: &mut Vec<Record>,
        op: &BulkOp,
    ) -> Result<usize, BulkError> {
        self.apply_bulk_at(records, op, Utc::now())
    }

    /// The consume-and-clear bulk transaction: mutate a copy of the
    /// collection, replace the caller's collection with it, then clear the
    /// selection — strictly in that order, so the selection can never be
    /// cleared ahead of a write that did not complete.
    ///
    /// Refuses (no-op, collection and selection untouched) when nothing is
    /// selected or the operation is missing a required parameter.
    pub fn apply_bulk_at(
        &mut self,
        records: &mut Vec<Record>,
        op: &BulkOp,
        now: DateTime<Utc>,
    ) -> Result<usize, BulkError> {
        if self.selection.is_empty() {
            warn!("bulk refused: nothing selected");
            return Err(BulkError::NothingSelected);
        }

        let applied = self.mutator.apply_at(op, &self.selection, records, now)?;
        debug!("bulk applied to {} of {} selected", applied.affected, self.selection.len());

        *records = applied.records;
        self.selection.clear();
        Ok(applied.affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldValue;
    use chrono::TimeZone;

    fn engine() -> GridEngine {
        let config = FilterConfig::new()
            .search_field("name")
            .category("Status", "status", ["Active", "Inactive"]);
        GridEngine::new(config, ComparatorRegistry::new())
    }

    fn records() -> Vec<Record> {
        vec![
            Record::new("1")
                .with_field("name", "Venkata Rao")
                .with_field("status", "Active")
                .with_field("age", 30i64),
            Record::new("2")
                .with_field("name", "Rao Kumar")
                .with_field("status", "Inactive")
                .with_field("age", FieldValue::Null),
            Record::new("3")
                .with_field("name", "Lakshmi Devi")
                .with_field("status", "Active")
                .with_field("age", 25i64),
        ]
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_selection_survives_filter_round_trip() {
        let mut eng = engine();
        let records = records();
        let aux = Auxiliary::new();

        eng.toggle_row("1");
        assert!(eng.is_selected("1"));

        // Filter id 1 out of the view.
        eng.set_search("kumar");
        let visible = eng.visible_ids(&records, &aux);
        assert_eq!(visible, vec!["2"]);
        assert!(eng.is_selected("1"));
        assert_eq!(eng.selection_status(&records, &aux), SelectionStatus::None);

        // Revert: still selected throughout.
        eng.set_search("");
        assert!(eng.is_selected("1"));
        assert_eq!(eng.selection_status(&records, &aux), SelectionStatus::Some);
    }

    #[test]
    fn test_sort_toggle_through_engine() {
        let mut eng = engine();

        eng.request_sort("age");
        assert_eq!(eng.sort_state().unwrap().key, "age");
        assert_eq!(
            eng.sort_state().unwrap().direction,
            crate::sort::SortDirection::Ascending
        );

        eng.request_sort("age");
        assert_eq!(
            eng.sort_state().unwrap().direction,
            crate::sort::SortDirection::Descending
        );

        eng.request_sort("name");
        assert_eq!(eng.sort_state().unwrap().key, "name");
        assert_eq!(
            eng.sort_state().unwrap().direction,
            crate::sort::SortDirection::Ascending
        );
    }

    #[test]
    fn test_select_all_visible_respects_filter() {
        let mut eng = engine();
        let records = records();
        let aux = Auxiliary::new();

        eng.set_category("Status", "Active");
        eng.select_all_visible(&records, &aux, true);
        assert_eq!(eng.selected_count(), 2);
        assert!(eng.is_selected("1"));
        assert!(eng.is_selected("3"));
        assert!(!eng.is_selected("2"));
        assert_eq!(eng.selection_status(&records, &aux), SelectionStatus::All);

        eng.select_all_visible(&records, &aux, false);
        assert_eq!(eng.selected_count(), 0);
    }

    #[test]
    fn test_bulk_transaction_clears_selection() {
        let mut eng = engine();
        let mut records = records();
        let aux = Auxiliary::new();

        eng.toggle_row("1");
        eng.toggle_row("3");

        let op = BulkOp::SetField {
            field: "status".to_string(),
            value: FieldValue::from("Inactive"),
        };
        let affected = eng.apply_bulk_at(&mut records, &op, now()).unwrap();
        assert_eq!(affected, 2);
        assert_eq!(eng.selected_count(), 0);

        for id in ["1", "3"] {
            let r = records.iter().find(|r| r.id() == id).unwrap();
            assert_eq!(r.get("status").as_str(), Some("Inactive"));
            assert!(!r.get("updatedAt").is_null());
        }

        // The filter now hides every record under "Active".
        eng.set_category("Status", "Active");
        assert!(eng.visible_ids(&records, &aux).is_empty());
        assert_eq!(eng.selection_status(&records, &aux), SelectionStatus::None);
    }

    #[test]
    fn test_bulk_refusal_leaves_everything_untouched() {
        let mut eng = engine();
        let mut records = records();
        let original = records.clone();

        eng.toggle_row("1");
        let op = BulkOp::Reassign {
            field: "assignedAgentId".to_string(),
            target_id: "".to_string(),
        };

        let err = eng.apply_bulk_at(&mut records, &op, now()).unwrap_err();
        assert_eq!(err, BulkError::MissingTarget);
        assert_eq!(records, original);
        assert_eq!(eng.selected_count(), 1);
    }

    #[test]
    fn test_bulk_with_empty_selection_refuses() {
        let mut eng = engine();
        let mut records = records();

        let err = eng
            .apply_bulk_at(&mut records, &BulkOp::Remove, now())
            .unwrap_err();
        assert_eq!(err, BulkError::NothingSelected);
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_bulk_remove_updates_collection() {
        let mut eng = engine();
        let mut records = records();

        eng.toggle_row("2");
        let affected = eng
            .apply_bulk_at(&mut records, &BulkOp::Remove, now())
            .unwrap();
        assert_eq!(affected, 1);
        let ids: Vec<&str> = records.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
