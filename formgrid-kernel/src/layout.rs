//! Row layout over the 4-section grid.
//!
//! Rows are never stored. They are re-derived from the flat field list on
//! every pass with one greedy rule: keep adding fields to the current row
//! until the next one would overflow the grid, and always give a `full`
//! field a row of its own. The export path (`derive_schema_with_widths`)
//! applies the same rule, so saved width tables and the canvas can't disagree.

use std::ops::Range;

use formgrid_api::{Field, FieldId, FormSchema, SavedForm, Width, GRID_SECTIONS};
use serde_json::Value as JsonValue;

/// One derived row: a contiguous slice of the flat field list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row<'a> {
    /// Position of this row in the layout.
    pub index: usize,
    /// Flat index of the row's first field.
    pub start: usize,
    pub fields: &'a [Field],
}

impl<'a> Row<'a> {
    /// Flat index one past the row's last field.
    pub fn end(&self) -> usize {
        self.start + self.fields.len()
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    pub fn contains(&self, flat_index: usize) -> bool {
        self.range().contains(&flat_index)
    }

    /// Sum of the members' column spans.
    pub fn span(&self) -> u8 {
        self.fields.iter().map(Field::span).sum()
    }

    pub fn widths(&self) -> Vec<Width> {
        self.fields.iter().map(|f| f.width).collect()
    }

    pub fn position_of(&self, id: &FieldId) -> Option<usize> {
        self.fields
            .iter()
            .position(|f| &f.id == id)
            .map(|offset| self.start + offset)
    }
}

/// Where a moved row lands relative to its target row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEdge {
    Before,
    After,
}

/// Whether a field of width `next` must open a new row after a row already
/// holding `current` spans.
#[inline]
fn breaks_row(current: u8, next: Width) -> bool {
    current > 0 && (next == Width::Full || current + next.span() > GRID_SECTIONS)
}

/// Flat index ranges of every row, in order.
pub fn row_ranges(fields: &[Field]) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;
    let mut current = 0u8;

    for (i, field) in fields.iter().enumerate() {
        if breaks_row(current, field.width) {
            ranges.push(start..i);
            start = i;
            current = 0;
        }
        current += field.span();
    }
    if start < fields.len() {
        ranges.push(start..fields.len());
    }
    ranges
}

/// Group an ordered field list into grid rows.
pub fn group_into_rows(fields: &[Field]) -> Vec<Row<'_>> {
    row_ranges(fields)
        .into_iter()
        .enumerate()
        .map(|(index, range)| Row {
            index,
            start: range.start,
            fields: &fields[range],
        })
        .collect()
}

/// Build the export unit: the flat list plus its row-grouped width table.
pub fn derive_schema_with_widths(fields: &[Field]) -> FormSchema {
    let mut widths: Vec<Vec<Width>> = Vec::new();
    let mut current_row: Vec<Width> = Vec::new();
    let mut current = 0u8;

    for field in fields {
        if breaks_row(current, field.width) {
            widths.push(std::mem::take(&mut current_row));
            current = 0;
        }
        current_row.push(field.width);
        current += field.span();
    }
    if !current_row.is_empty() {
        widths.push(current_row);
    }

    FormSchema {
        schema: fields.to_vec(),
        widths,
    }
}

/// Load a saved form back into a flat field list.
///
/// The width table is flattened and zipped positionally onto the fields.
/// Any position the table does not cover (absent, short, or non-string
/// entries) keeps the field's own width. Never fails.
pub fn parse_schema_with_widths(saved: SavedForm) -> Vec<Field> {
    let (mut fields, widths) = saved.into_parts();

    let Some(flat) = flatten_widths(&widths) else {
        if !widths.is_null() {
            tracing::warn!("Ignoring malformed width table; using stored field widths");
        }
        return fields;
    };

    if flat.len() != fields.len() {
        tracing::warn!(
            "Width table covers {} fields but schema has {}; falling back per field",
            flat.len(),
            fields.len()
        );
    }

    for (field, width) in fields.iter_mut().zip(flat) {
        if let Some(width) = width {
            field.width = width;
        }
    }
    fields
}

/// Flatten a raw width table. `None` when the table is not an array at all.
fn flatten_widths(widths: &JsonValue) -> Option<Vec<Option<Width>>> {
    let rows = widths.as_array()?;
    let mut flat = Vec::new();
    for row in rows {
        match row {
            JsonValue::Array(items) => {
                flat.extend(items.iter().map(|w| w.as_str().map(Width::parse)));
            }
            JsonValue::String(s) => flat.push(Some(Width::parse(s))),
            _ => flat.push(None),
        }
    }
    Some(flat)
}

/// Row index holding the field at `flat_index`.
pub fn row_of(fields: &[Field], flat_index: usize) -> Option<usize> {
    row_ranges(fields)
        .iter()
        .position(|range| range.contains(&flat_index))
}

/// Whether two flat indices currently sit in the same row.
pub fn same_row(fields: &[Field], a: usize, b: usize) -> bool {
    match (row_of(fields, a), row_of(fields, b)) {
        (Some(ra), Some(rb)) => ra == rb,
        _ => false,
    }
}

pub fn position(fields: &[Field], id: &FieldId) -> Option<usize> {
    fields.iter().position(|f| &f.id == id)
}

/// Splice the field at `from` out and re-insert it so it ends at `to`.
///
/// `to` is an index into the list after removal; it is clamped to the end.
pub fn move_field(fields: &[Field], from: usize, to: usize) -> Option<Vec<Field>> {
    if from >= fields.len() {
        return None;
    }
    let mut next = fields.to_vec();
    let field = next.remove(from);
    let to = to.min(next.len());
    next.insert(to, field);
    Some(next)
}

/// Exchange the positions of two fields. Attributes travel with the fields.
pub fn swap_fields(fields: &[Field], a: usize, b: usize) -> Option<Vec<Field>> {
    if a >= fields.len() || b >= fields.len() {
        return None;
    }
    let mut next = fields.to_vec();
    next.swap(a, b);
    Some(next)
}

/// Move the whole of row `from_row` before or after row `to_row`,
/// keeping the moved fields' internal order.
pub fn move_row(fields: &[Field], from_row: usize, to_row: usize, edge: RowEdge) -> Option<Vec<Field>> {
    let ranges = row_ranges(fields);
    let source = ranges.get(from_row)?.clone();
    let target = ranges.get(to_row)?.clone();
    if from_row == to_row {
        return Some(fields.to_vec());
    }

    let mut insert_at = match edge {
        RowEdge::Before => target.start,
        RowEdge::After => target.end,
    };
    if source.start < insert_at {
        insert_at -= source.len();
    }

    let mut next = fields.to_vec();
    let block: Vec<Field> = next.drain(source).collect();
    next.splice(insert_at..insert_at, block);
    Some(next)
}
