//! Plain-text rendering of derived layouts
//!
//! Used by the command line tool and by snapshot tests. Each sector is a
//! fixed-width cell; a field spanning several sectors is drawn once, across
//! all of them.

use std::fmt::Write;

use unicode_width::UnicodeWidthChar;

use super::rows::row_columns;
use super::sectors::SectorRow;
use crate::model::field::{FieldDescriptor, COLUMNS_PER_ROW, SECTORS_PER_ROW};

/// Display width of one sector, padding included
pub const CELL_WIDTH: usize = 12;

/// Render the sector grid, one line per row
pub fn render_sector_grid(rows: &[SectorRow<'_>]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push('|');
        let mut sector = 0;
        while sector < SECTORS_PER_ROW {
            let span = match &row[sector] {
                Some(slot) => {
                    let span = slot.sector_span - slot.sector_index;
                    let mut text = slot.field.label.clone();
                    if slot.explicit {
                        text.push('*');
                    }
                    out.push_str(&cell(&text, span));
                    span
                }
                None => {
                    out.push_str(&cell("", 1));
                    1
                }
            };
            out.push('|');
            sector += span;
        }
        out.push('\n');
    }
    out
}

/// Render twelve-column rows, one line per row
pub fn render_column_rows(rows: &[Vec<&FieldDescriptor>]) -> String {
    let mut out = String::new();
    for (index, row) in rows.iter().enumerate() {
        let fields = row
            .iter()
            .map(|f| format!("{} ({})", f.label, f.column_span()))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            out,
            "row {}: {} [{}/{}]",
            index + 1,
            fields,
            row_columns(row),
            COLUMNS_PER_ROW
        );
    }
    out
}

/// Left-aligned cell covering `sectors` sectors, truncated to fit
fn cell(text: &str, sectors: usize) -> String {
    // Adjacent sectors of one field also absorb the separators between them.
    let width = sectors * CELL_WIDTH + sectors - 1;
    let inner = width - 2;

    let mut out = String::with_capacity(width);
    out.push(' ');
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > inner {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.extend(std::iter::repeat(' ').take(inner - used + 1));
    out
}
