//! Duplicate column and row detection.
//!
//! Two columns are duplicates when every value matches positionally; two
//! rows when their full tuples match. Null equals null in both views.
//! Each column/row is reduced to one content signature and checked
//! against a set of already-seen signatures, so detection is O(N x W)
//! and never rescans pairwise. The first occurrence of a pattern, in
//! schema or row order, is not a duplicate; later identical ones are.

use std::collections::HashSet;

use crate::values::{Cell, ColumnData};

/// Appends one cell to a signature. Length-prefixed tokens keep the
/// encoding unambiguous whatever bytes the value text contains; null
/// gets a token no value can produce.
fn push_token(sig: &mut String, cell: &Cell) {
    match cell.text() {
        Some(text) => {
            sig.push_str(&text.len().to_string());
            sig.push(':');
            sig.push_str(&text);
        }
        None => sig.push('n'),
    }
}

/// Marks the non-first occurrences of value-identical patterns.
///
/// `signatures` must be in original (schema or row) order; the result is
/// aligned with it.
fn mark_duplicates(signatures: impl Iterator<Item = String>) -> Vec<bool> {
    let mut seen: HashSet<String> = HashSet::new();
    signatures.map(|sig| !seen.insert(sig)).collect()
}

/// Per-column duplicate flags, in schema order.
pub(crate) fn duplicate_columns(columns: &[ColumnData]) -> Vec<bool> {
    mark_duplicates(columns.iter().map(|column| {
        let mut sig = String::new();
        for cell in &column.cells {
            push_token(&mut sig, cell);
        }
        sig
    }))
}

/// Per-row duplicate flags, in row order.
pub(crate) fn duplicate_rows(columns: &[ColumnData], row_count: usize) -> Vec<bool> {
    mark_duplicates((0..row_count).map(|row| {
        let mut sig = String::new();
        for column in columns {
            push_token(&mut sig, &column.cells[row]);
        }
        sig
    }))
}
