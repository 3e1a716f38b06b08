//! Pure string/geometry calculus over A1 range notation.
//!
//! These functions operate on range *specifications* (caller-supplied
//! strings), not parsed [`Range`](sheetview_model::Range) values: several of
//! them must observe reversed or otherwise non-normalized input, which
//! `Range::new` would silently repair.

use sheetview_model::{column_letter, CellRef, RangeParseError};
use tracing::warn;

use crate::error::ExtractError;

/// Split a spec into start/end parts; a single cell is its own end.
fn split_pair(raw: &str) -> (&str, &str) {
    match raw.split_once(':') {
        Some((start, end)) => (start, end),
        None => (raw, raw),
    }
}

fn invalid_range(spec: &str, source: sheetview_model::A1ParseError) -> ExtractError {
    ExtractError::InvalidRange {
        spec: spec.to_string(),
        source: RangeParseError::Cell(source),
    }
}

/// Expand a bare-column spec (`J`, `J:K`, `$J:$K`, case-insensitive) into a
/// fully row-bounded range (`J1:K<max_row>`).
///
/// Already-bounded or non-column specs pass through unchanged, as does
/// empty/whitespace-only input (whitespace included). Reversed column ranges
/// (`K:J`) are an error here; this is the one place in the calculus that
/// raises on reversal rather than deferring to the size gate.
pub fn normalize_column_range(spec: &str, max_row: u32) -> Result<String, ExtractError> {
    let raw = spec.trim();
    if raw.is_empty() {
        return Ok(spec.to_string());
    }

    if let Some((start, end)) = raw.split_once(':') {
        let start_col = start.replace('$', "");
        let end_col = end.replace('$', "");
        if is_column_only(&start_col) && is_column_only(&end_col) {
            let start_col = start_col.to_ascii_uppercase();
            let end_col = end_col.to_ascii_uppercase();
            let start_idx =
                sheetview_model::column_index(&start_col).map_err(|e| invalid_range(spec, e))?;
            let end_idx =
                sheetview_model::column_index(&end_col).map_err(|e| invalid_range(spec, e))?;
            if end_idx < start_idx {
                return Err(ExtractError::RangeOrder {
                    spec: spec.to_string(),
                });
            }
            return Ok(format!("{start_col}1:{end_col}{max_row}"));
        }
        return Ok(spec.to_string());
    }

    let col_only = raw.replace('$', "");
    if is_column_only(&col_only) {
        let col = col_only.to_ascii_uppercase();
        return Ok(format!("{col}1:{col}{max_row}"));
    }

    Ok(spec.to_string())
}

fn is_column_only(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Expand a single cell, column or row toward the grid origin.
///
/// - single cell: `C5` -> `C1:C5`
/// - single column: `Z100:Z200` -> `Z1:Z200`
/// - single row: `D200:Z200` -> `A200:Z200`
/// - rectangles and unparseable input pass through unchanged
///
/// Reversed single-column/single-row ranges are returned unmodified;
/// detecting them is deferred to the size gate.
pub fn expand_axis_range(spec: &str) -> String {
    if spec.is_empty() {
        return spec.to_string();
    }

    let raw = spec.trim();
    let Some((start_part, end_part)) = raw.split_once(':') else {
        return match CellRef::from_a1(raw) {
            Ok(cell) => {
                let col = column_letter(cell.col);
                format!("{col}1:{col}{}", cell.row)
            }
            Err(_) => spec.to_string(),
        };
    };

    let (Ok(start), Ok(end)) = (CellRef::from_a1(start_part), CellRef::from_a1(end_part)) else {
        return spec.to_string();
    };

    if start.col == end.col {
        if end.row < start.row {
            return spec.to_string();
        }
        let col = column_letter(start.col);
        return format!("{col}1:{col}{}", end.row);
    }

    if start.row == end.row {
        if end.col < start.col {
            return spec.to_string();
        }
        return format!("A{}:{}{}", start.row, column_letter(end.col), end.row);
    }

    spec.to_string()
}

/// Row and column counts of a range spec.
///
/// A single-cell spec counts as `(1, 1)`. Reversed or unparseable specs
/// return the `(0, 0)` sentinel rather than raising; callers must treat
/// `(0, 0)` as "could not determine size".
pub fn calculate_range_size(spec: &str) -> (u32, u32) {
    if !spec.contains(':') {
        return (1, 1);
    }

    let (start_part, end_part) = split_pair(spec.trim());
    let (Ok(start), Ok(end)) = (CellRef::from_a1(start_part), CellRef::from_a1(end_part)) else {
        warn!(spec, "failed to calculate range size");
        return (0, 0);
    };

    if end.row < start.row || end.col < start.col {
        warn!(spec, "reversed range in size calculation");
        return (0, 0);
    }

    (end.row - start.row + 1, end.col - start.col + 1)
}

/// Header rows needed to complete `spec` up to the frozen boundary.
///
/// Returns `None` when there are no frozen rows or the range already starts
/// at row 1. When the range starts within the frozen band, only the missing
/// top rows are returned (`frozen_rows = 2`, `A2:B6` -> `A1:B1`); when it
/// starts below the band, the full header block is returned
/// (`frozen_rows = 2`, `A5:D10` -> `A1:D2`).
pub fn calculate_header_range(spec: &str, frozen_rows: u32) -> Option<String> {
    if frozen_rows == 0 {
        return None;
    }

    let (start_part, end_part) = split_pair(spec.trim());
    let (Ok(start), Ok(end)) = (CellRef::from_a1(start_part), CellRef::from_a1(end_part)) else {
        warn!(spec, "failed to parse range for header calculation");
        return None;
    };

    if start.row == 1 {
        return None;
    }

    let start_col = column_letter(start.col);
    let end_col = column_letter(end.col);

    if start.row <= frozen_rows {
        return Some(format!("{start_col}1:{end_col}{}", start.row - 1));
    }

    Some(format!("{start_col}1:{end_col}{frozen_rows}"))
}

/// Minimal bounding rectangle over two range specs.
pub fn merge_ranges(a: &str, b: &str) -> Result<String, ExtractError> {
    let (a_start, a_end) = split_pair(a.trim());
    let (b_start, b_end) = split_pair(b.trim());

    let a_start = CellRef::from_a1(a_start).map_err(|e| invalid_range(a, e))?;
    let a_end = CellRef::from_a1(a_end).map_err(|e| invalid_range(a, e))?;
    let b_start = CellRef::from_a1(b_start).map_err(|e| invalid_range(b, e))?;
    let b_end = CellRef::from_a1(b_end).map_err(|e| invalid_range(b, e))?;

    let start_col = a_start.col.min(b_start.col);
    let end_col = a_end.col.max(b_end.col);
    let start_row = a_start.row.min(b_start.row);
    let end_row = a_end.row.max(b_end.row);

    Ok(format!(
        "{}{}:{}{}",
        column_letter(start_col),
        start_row,
        column_letter(end_col),
        end_row
    ))
}
