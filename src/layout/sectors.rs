//! Placement of fields into four-sector rows
//!
//! Fields are first bucketed by their effective row: the explicit
//! `row_index` when set, otherwise `list_index / 4`. Buckets are laid out in
//! ascending row order, each in two passes:
//!
//! 1. Explicit pass: fields carrying a `sector_position` claim
//!    `[position, position + span)` in the bucket's first row, provided the
//!    range lies inside the row and every sector in it is still empty.
//! 2. Auto pass: every other field (including explicit requests that lost a
//!    conflict) takes the leftmost run of empty sectors wide enough for it in
//!    the current row. When nothing fits, the current row is emitted as-is and
//!    the field opens a fresh row.
//!
//! Placement never fails; a request that cannot be honored degrades to auto
//! placement.

use std::collections::BTreeMap;

use crate::model::field::{FieldDescriptor, SECTORS_PER_ROW};

/// One occupied sector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorSlot<'a> {
    pub field: &'a FieldDescriptor,
    /// Offset of this sector within the field's own span
    pub sector_index: usize,
    /// Total sectors covered by the field
    pub sector_span: usize,
    /// Row-relative sector where the field starts
    pub start_sector: usize,
    /// Whether the field landed on its requested `sector_position`
    pub explicit: bool,
}

impl SectorSlot<'_> {
    /// The slot a multi-sector field is rendered from
    pub fn is_origin(&self) -> bool {
        self.sector_index == 0
    }
}

/// A row of the sector grid; `None` marks an empty sector
pub type SectorRow<'a> = [Option<SectorSlot<'a>>; SECTORS_PER_ROW];

/// Lay `fields` out on the four-sector grid
pub fn organize_into_sectors(fields: &[FieldDescriptor]) -> Vec<SectorRow<'_>> {
    let mut buckets: BTreeMap<usize, Vec<&FieldDescriptor>> = BTreeMap::new();
    for (index, field) in fields.iter().enumerate() {
        let row = field.row_index.unwrap_or(index / SECTORS_PER_ROW);
        buckets.entry(row).or_default().push(field);
    }

    let mut rows = Vec::new();
    for (row_index, bucket) in buckets {
        let before = rows.len();
        place_bucket(&bucket, &mut rows);
        tracing::trace!(
            row_index,
            fields = bucket.len(),
            rows = rows.len() - before,
            "placed row bucket"
        );
    }
    rows
}

fn place_bucket<'a>(bucket: &[&'a FieldDescriptor], rows: &mut Vec<SectorRow<'a>>) {
    let mut current: SectorRow<'a> = Default::default();
    let mut deferred = Vec::new();

    for &field in bucket {
        match field.sector_position {
            Some(start) if is_free(&current, start, field.sector_count()) => {
                occupy(&mut current, field, start, true);
            }
            Some(start) => {
                tracing::debug!(
                    id = %field.id,
                    start,
                    span = field.sector_count(),
                    "explicit placement unavailable, auto placing"
                );
                deferred.push(field);
            }
            None => deferred.push(field),
        }
    }

    for field in deferred {
        let span = field.sector_count();
        let start = match first_fit(&current, span) {
            Some(start) => start,
            None => {
                rows.push(std::mem::take(&mut current));
                0
            }
        };
        occupy(&mut current, field, start, false);
    }

    if current.iter().any(Option::is_some) {
        rows.push(current);
    }
}

/// Whether `[start, start + span)` lies inside the row and is unoccupied
fn is_free(row: &SectorRow<'_>, start: usize, span: usize) -> bool {
    start
        .checked_add(span)
        .is_some_and(|end| end <= SECTORS_PER_ROW && row[start..end].iter().all(Option::is_none))
}

/// Leftmost start sector with `span` free sectors
fn first_fit(row: &SectorRow<'_>, span: usize) -> Option<usize> {
    if span > SECTORS_PER_ROW {
        return None;
    }
    (0..=SECTORS_PER_ROW - span).find(|&start| is_free(row, start, span))
}

fn occupy<'a>(row: &mut SectorRow<'a>, field: &'a FieldDescriptor, start: usize, explicit: bool) {
    let span = field.sector_count();
    for (offset, slot) in row[start..start + span].iter_mut().enumerate() {
        *slot = Some(SectorSlot {
            field,
            sector_index: offset,
            sector_span: span,
            start_sector: start,
            explicit,
        });
    }
}

/// The fields of a row in sector order, each once
pub fn row_fields<'a>(row: &SectorRow<'a>) -> Vec<&'a FieldDescriptor> {
    row.iter()
        .flatten()
        .filter(|slot| slot.is_origin())
        .map(|slot| slot.field)
        .collect()
}

/// Number of occupied sectors in a row
pub fn occupied(row: &SectorRow<'_>) -> usize {
    row.iter().filter(|slot| slot.is_some()).count()
}
