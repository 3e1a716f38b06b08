//! Frozen-pane boundary extraction, validation and formatting.

use sheetview_model::{CellRef, PaneState, Sheet};

/// Frozen row/column counts of a sheet, from its split offsets.
///
/// The pane's `top_left` scroll indicator is never consulted: it drifts when
/// a user scrolls and re-saves the document while the split offsets remain
/// stable. Sheets without a pane, or whose pane is a free (non-frozen)
/// split, report `(0, 0)`.
pub fn frozen_panes(sheet: &Sheet) -> (u32, u32) {
    let Some(pane) = &sheet.pane else {
        return (0, 0);
    };
    if !matches!(pane.state, PaneState::Frozen | PaneState::FrozenSplit) {
        return (0, 0);
    }
    (pane.y_split, pane.x_split)
}

/// Render the freeze-pane anchor: the cell one row and one column past the
/// frozen boundary (2 rows + 1 col -> `B3`).
pub fn format_freeze_panes(frozen_rows: u32, frozen_cols: u32) -> String {
    CellRef::new(frozen_rows + 1, frozen_cols + 1).to_a1()
}

/// Validate a frozen-row count against the configured ceiling.
///
/// Returns `(is_valid, validated_count)`. Negative counts clamp to 0 and are
/// considered valid; counts above `limit` are invalid and clamp to 0. On an
/// invalid count the caller must zero the frozen-column count as well:
/// disabling one axis without the other is not a supported state.
pub fn validate_frozen_rows(frozen_rows: i64, limit: u32) -> (bool, u32) {
    if frozen_rows < 0 {
        return (true, 0);
    }
    if frozen_rows > limit as i64 {
        return (false, 0);
    }
    (true, frozen_rows as u32)
}
