//! Greedy partition of a field list into twelve-column display rows
//!
//! Single pass, order preserving. A row is closed as soon as the next field
//! would overflow it; partially filled rows are never backfilled with later,
//! smaller fields, so the canvas shows fields in the order they were placed.

use crate::model::field::{FieldDescriptor, FieldWidth, COLUMNS_PER_ROW};

/// Group `fields` into rows whose column spans sum to at most twelve
///
/// A full-width field always starts a new row.
pub fn group_into_rows(fields: &[FieldDescriptor]) -> Vec<Vec<&FieldDescriptor>> {
    let mut rows = Vec::new();
    let mut current: Vec<&FieldDescriptor> = Vec::new();
    let mut used = 0;

    for field in fields {
        let span = field.column_span();
        if used + span > COLUMNS_PER_ROW || field.width == FieldWidth::Full {
            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
            }
            used = 0;
        }
        current.push(field);
        used += span;
    }

    if !current.is_empty() {
        rows.push(current);
    }

    tracing::trace!(fields = fields.len(), rows = rows.len(), "grouped rows");
    rows
}

/// Sum of the column spans of one row
pub fn row_columns(row: &[&FieldDescriptor]) -> usize {
    row.iter().map(|f| f.column_span()).sum()
}
