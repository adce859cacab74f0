/// TableKit Projection
///
/// `project` derives the ordered, filtered view of a record collection:
/// filter the full collection, then stable-sort the survivors under the
/// active sort key. It is a pure function of its inputs — no incremental
/// cache, no internal pagination — recomputed in full on every call, which
/// is cheap at the hundreds-to-thousands of records these views hold.
///
/// The sort is stable: records that compare equal keep their original
/// collection order, so repeated calls with unchanged inputs yield an
/// identical ordering.

use crate::auxiliary::Auxiliary;
use crate::filter::{self, FilterConfig, FilterState};
use crate::record::Record;
use crate::sort::{ComparatorRegistry, SortState};

/// Filter, then stable-sort. `sort: None` keeps original collection order.
pub fn project<'a>(
    records: &'a [Record],
    config: &FilterConfig,
    filter: &FilterState,
    sort: Option<&SortState>,
    registry: &ComparatorRegistry,
    aux: &Auxiliary,
) -> Vec<&'a Record> {
    let mut view: Vec<&Record> = records
        .iter()
        .filter(|r| filter::matches(r, config, filter, aux))
        .collect();

    if let Some(state) = sort {
        view.sort_by(|a, b| registry.compare(state, a, b, aux));
    }

    view
}

/// The ids of the current projection, in view order. Feeds the selection
/// tracker's visible-set operations.
pub fn visible_ids(view: &[&Record]) -> Vec<String> {
    view.iter().map(|r| r.id().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortDirection;
    use crate::value::FieldValue;

    fn farmers() -> Vec<Record> {
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

    fn config() -> FilterConfig {
        FilterConfig::new()
            .search_field("name")
            .category("Status", "status", ["Active", "Inactive"])
    }

    #[test]
    fn test_filter_then_sort() {
        let records = farmers();
        let registry = ComparatorRegistry::new();
        let aux = Auxiliary::new();
        let cfg = config();

        let mut filter = FilterState::new();
        filter.set_category("Status", "Active");
        let sort = SortState::ascending("age");

        let view = project(&records, &cfg, &filter, Some(&sort), &registry, &aux);
        let ids: Vec<&str> = view.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["3", "1"]);
    }

    #[test]
    fn test_null_sorts_last_both_directions() {
        let records = farmers();
        let registry = ComparatorRegistry::new();
        let aux = Auxiliary::new();
        let cfg = config();
        let filter = FilterState::new();

        let mut sort = SortState::ascending("age");
        let view = project(&records, &cfg, &filter, Some(&sort), &registry, &aux);
        let ids: Vec<&str> = view.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);

        sort.direction = SortDirection::Descending;
        let view = project(&records, &cfg, &filter, Some(&sort), &registry, &aux);
        let ids: Vec<&str> = view.iter().map(|r| r.id()).collect();
        // Descending flips the non-null order; the null row stays last.
        assert_eq!(ids, vec!["1", "3", "2"]);
    }

    #[test]
    fn test_stability_preserves_tie_order() {
        let records = vec![
            Record::new("a").with_field("status", "Active"),
            Record::new("b").with_field("status", "Active"),
            Record::new("c").with_field("status", "Active"),
        ];
        let registry = ComparatorRegistry::new();
        let aux = Auxiliary::new();
        let cfg = FilterConfig::new().search_field("status");
        let filter = FilterState::new();

        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let sort = SortState {
                key: "status".to_string(),
                direction,
            };
            let view = project(&records, &cfg, &filter, Some(&sort), &registry, &aux);
            let ids: Vec<&str> = view.iter().map(|r| r.id()).collect();
            assert_eq!(ids, vec!["a", "b", "c"], "ties must keep collection order");
        }
    }

    #[test]
    fn test_idempotent() {
        let records = farmers();
        let registry = ComparatorRegistry::new();
        let aux = Auxiliary::new();
        let cfg = config();
        let mut filter = FilterState::new();
        filter.set_search("rao");
        let sort = SortState::ascending("name");

        let first = project(&records, &cfg, &filter, Some(&sort), &registry, &aux);
        let second = project(&records, &cfg, &filter, Some(&sort), &registry, &aux);
        let a: Vec<&str> = first.iter().map(|r| r.id()).collect();
        let b: Vec<&str> = second.iter().map(|r| r.id()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_sort_keeps_collection_order() {
        let records = farmers();
        let registry = ComparatorRegistry::new();
        let aux = Auxiliary::new();
        let cfg = config();
        let filter = FilterState::new();

        let view = project(&records, &cfg, &filter, None, &registry, &aux);
        assert_eq!(visible_ids(&view), vec!["1", "2", "3"]);
    }
}
