/// TableKit Selection
///
/// A persistent set of selected record ids, independent of the current
/// projection: an id stays selected when the view is re-sorted, when the
/// row scrolls out of view, or when a filter temporarily hides it. The set
/// only shrinks by explicit deselection, an explicit `clear`, or an
/// explicit `retain` prune by the host.
///
/// `status` derives the tri-state "select all" checkbox value from the
/// currently visible ids.

use std::collections::HashSet;

/// Tri-state summary of the visible rows' selection, mapped by the host to
/// its native indeterminate-checkbox mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStatus {
    /// No visible row is selected (always the case for an empty view).
    None,
    /// Some but not all visible rows are selected.
    Some,
    /// Every visible row is selected and the view is non-empty.
    All,
}

/// The set of selected record ids for one view.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    ids: HashSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    /// Flip membership of a single id.
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    /// "Select all visible": union with the given ids when `checked`,
    /// set-difference when not. Both directions are idempotent.
    pub fn set_visible<I, S>(&mut self, visible: I, checked: bool)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for id in visible {
            if checked {
                self.ids.insert(id.as_ref().to_string());
            } else {
                self.ids.remove(id.as_ref());
            }
        }
    }

    /// Tri-state status against the currently visible ids. An empty visible
    /// set reports `None`, never `All`.
    pub fn status<S: AsRef<str>>(&self, visible: &[S]) -> SelectionStatus {
        if visible.is_empty() || self.ids.is_empty() {
            return SelectionStatus::None;
        }

        let selected = visible
            .iter()
            .filter(|id| self.ids.contains(id.as_ref()))
            .count();

        if selected == 0 {
            SelectionStatus::None
        } else if selected == visible.len() {
            SelectionStatus::All
        } else {
            SelectionStatus::Some
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The selected ids, unordered. Drives "N selected" summaries and
    /// enabling of bulk-action controls.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Explicit deselect-all.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Explicit prune for hosts that opt in, e.g. after deleting records.
    /// Never called implicitly by the engine.
    pub fn retain<F: Fn(&str) -> bool>(&mut self, keep: F) {
        self.ids.retain(|id| keep(id));
    }
}
