/// TableKit Bulk Mutation
///
/// A bulk operation applies one mutation uniformly to every selected record
/// that is still present in the collection. The mutator is copy-on-write:
/// it never edits the caller's records in place, it returns a new
/// collection value for the caller to assign. Selected ids with no matching
/// record are silently skipped (the record may have been removed by another
/// action since it was selected).
///
/// Every mutated record gets its last-modified timestamp set in the same
/// clone as the field change, so no observer can see one without the other.
///
/// A missing required parameter (empty reassignment target, empty field
/// name or value) refuses the whole operation as an error value; nothing is
/// partially applied.

use crate::record::Record;
use crate::selection::Selection;
use crate::value::FieldValue;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// The mutation to apply to every selected record.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkOp {
    /// Set a field to a fixed value, e.g. `status <- "Inactive"`.
    SetField { field: String, value: FieldValue },
    /// Point a reference field at a chosen id, e.g.
    /// `assignedAgentId <- "a-2"`.
    Reassign { field: String, target_id: String },
    /// Remove the selected records from the collection.
    Remove,
}

/// Why a bulk operation refused to run. These are expected user-input
/// states (clicking "Assign" with nothing chosen), not failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BulkError {
    #[error("bulk operation requires a field name")]
    MissingField,
    #[error("bulk set-field requires a value")]
    MissingValue,
    #[error("bulk reassignment requires a target id")]
    MissingTarget,
    #[error("no records selected")]
    NothingSelected,
}

/// Result of a successful bulk apply: the new collection value and how many
/// records it touched.
#[derive(Debug, Clone)]
pub struct Applied {
    pub records: Vec<Record>,
    pub affected: usize,
}

/// Applies bulk operations, stamping a last-modified timestamp on every
/// mutated record.
#[derive(Debug, Clone)]
pub struct BulkMutator {
    timestamp_field: String,
}

impl Default for BulkMutator {
    fn default() -> Self {
        BulkMutator {
            timestamp_field: "updatedAt".to_string(),
        }
    }
}

impl BulkMutator {
    pub fn new() -> Self {
        BulkMutator::default()
    }

    /// Use a different record field for the last-modified stamp.
    pub fn with_timestamp_field(name: impl Into<String>) -> Self {
        BulkMutator {
            timestamp_field: name.into(),
        }
    }

    pub fn timestamp_field(&self) -> &str {
        &self.timestamp_field
    }

    /// Apply with the current wall-clock time.
    pub fn apply(
        &self,
        op: &BulkOp,
        selection: &Selection,
        records: &[Record],
    ) -> Result<Applied, BulkError> {
        self.apply_at(op, selection, records, Utc::now())
    }

    /// Apply with an explicit timestamp (deterministic in tests).
    pub fn apply_at(
        &self,
        op: &BulkOp,
        selection: &Selection,
        records: &[Record],
        now: DateTime<Utc>,
    ) -> Result<Applied, BulkError> {
        validate(op)?;

        let stamp = now.to_rfc3339();

        let applied = match op {
            BulkOp::Remove => {
                let before = records.len();
                let kept: Vec<Record> = records
                    .iter()
                    .filter(|r| !selection.contains(r.id()))
                    .cloned()
                    .collect();
                let affected = before - kept.len();
                Applied {
                    records: kept,
                    affected,
                }
            }
            BulkOp::SetField { field, value } => {
                self.rewrite(records, selection, &stamp, |r| {
                    r.set(field.clone(), value.clone());
                })
            }
            BulkOp::Reassign { field, target_id } => {
                self.rewrite(records, selection, &stamp, |r| {
                    r.set(field.clone(), target_id.as_str());
                })
            }
        };

        Ok(applied)
    }

    /// Clone the collection, mutating selected records. The field change
    /// and the timestamp land in the same clone.
    fn rewrite<F: Fn(&mut Record)>(
        &self,
        records: &[Record],
        selection: &Selection,
        stamp: &str,
        mutate: F,
    ) -> Applied {
        let mut affected = 0;
        let records = records
            .iter()
            .map(|r| {
                if selection.contains(r.id()) {
                    let mut updated = r.clone();
                    mutate(&mut updated);
                    updated.set(self.timestamp_field.clone(), stamp);
                    affected += 1;
                    updated
                } else {
                    r.clone()
                }
            })
            .collect();

        Applied { records, affected }
    }
}

fn validate(op: &BulkOp) -> Result<(), BulkError> {
    match op {
        BulkOp::SetField { field, value } => {
            if field.trim().is_empty() {
                return Err(BulkError::MissingField);
            }
            let empty_str = value.as_str().is_some_and(|s| s.trim().is_empty());
            if value.is_null() || empty_str {
                return Err(BulkError::MissingValue);
            }
        }
        BulkOp::Reassign { field, target_id } => {
            if field.trim().is_empty() {
                return Err(BulkError::MissingField);
            }
            if target_id.trim().is_empty() {
                return Err(BulkError::MissingTarget);
            }
        }
        BulkOp::Remove => {}
    }
    Ok(())
}
