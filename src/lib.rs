/// TableKit - Client-Side Tabular Data Engine
///
/// A consolidated engine for record-listing screens: filtered and sorted
/// projections over an in-memory record collection, a persistent multi-row
/// selection that survives filter and sort changes, and bulk mutations
/// applied uniformly to the selection. Everything is pure, synchronous and
/// in-memory; the host owns the record collection and re-derives the view
/// on every state change.

pub mod auxiliary;
pub mod bulk;
pub mod engine;
pub mod export;
pub mod filter;
pub mod projection;
pub mod record;
pub mod selection;
pub mod sort;
pub mod value;

pub use auxiliary::Auxiliary;
pub use bulk::{Applied, BulkError, BulkMutator, BulkOp};
pub use engine::GridEngine;
pub use export::{export_rows, export_selected};
pub use filter::{CategoryDef, FilterConfig, FilterState, SearchField, ALL};
pub use projection::{project, visible_ids};
pub use record::Record;
pub use selection::{Selection, SelectionStatus};
pub use sort::{compare_values, ComparatorRegistry, DerivedKeyFn, SortDirection, SortState};
pub use value::FieldValue;
