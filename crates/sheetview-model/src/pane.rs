use serde::{Deserialize, Serialize};

use crate::CellRef;

/// Split state of a sheet's pane, as recorded by the source document.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaneState {
    /// Panes are frozen at the split position.
    Frozen,
    /// Panes were frozen, then split (legacy save state; still frozen).
    FrozenSplit,
    /// Free split with draggable dividers; nothing is pinned.
    Split,
}

/// Pane metadata of a sheet.
///
/// `y_split`/`x_split` are the number of rows/columns above/left of the
/// split. `top_left` is the first visible cell of the scrolled region; it
/// drifts when a user scrolls and re-saves while the split offsets stay
/// stable, so frozen-row/column counts must be derived from the split
/// offsets, never from `top_left`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SheetPane {
    pub state: PaneState,
    #[serde(default)]
    pub x_split: u32,
    #[serde(default)]
    pub y_split: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_left: Option<CellRef>,
}

impl SheetPane {
    /// Frozen pane with the given row/column counts.
    pub fn frozen(rows: u32, cols: u32) -> Self {
        Self {
            state: PaneState::Frozen,
            x_split: cols,
            y_split: rows,
            top_left: None,
        }
    }
}
