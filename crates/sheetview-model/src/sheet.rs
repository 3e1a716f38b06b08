use core::fmt;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Cell, CellKey, CellRef, CellValue, Fill, Range, SheetPane};

/// Errors raised when merging cells on a sheet.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MergeError {
    /// The new range overlaps an existing merge group.
    Overlap,
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeError::Overlap => f.write_str("merge range overlaps an existing merge group"),
        }
    }
}

impl std::error::Error for MergeError {}

/// Cell storage backing a sheet.
///
/// `Sparse` keeps only populated cells, keyed by [`CellKey`], and supports
/// iteration over populated cells in `(row, col)` order. `Grid` is a
/// row-major dense block anchored at `A1`; it exposes only whole-grid
/// access, so consumers that need populated-cell iteration must scan it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum CellStore {
    Sparse(BTreeMap<CellKey, Cell>),
    Grid(Vec<Vec<Cell>>),
}

/// A single sheet of a grid document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet name, as shown on the tab.
    pub name: String,

    store: CellStore,

    /// Merge groups. Each range covers the cells bound to one logical value.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merges: Vec<Range>,

    /// Pane metadata, when a split is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pane: Option<SheetPane>,

    /// Explicitly set column widths, keyed by 1-indexed column.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    col_widths: BTreeMap<u32, f64>,

    /// Explicitly set row heights, keyed by 1-indexed row.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    row_heights: BTreeMap<u32, f64>,
}

impl Sheet {
    /// Create an empty sheet with sparse cell storage.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            store: CellStore::Sparse(BTreeMap::new()),
            merges: Vec::new(),
            pane: None,
            col_widths: BTreeMap::new(),
            row_heights: BTreeMap::new(),
        }
    }

    /// Create a sheet backed by a dense row-major grid anchored at `A1`.
    pub fn from_grid(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            store: CellStore::Grid(rows),
            merges: Vec::new(),
            pane: None,
            col_widths: BTreeMap::new(),
            row_heights: BTreeMap::new(),
        }
    }

    /// The cell stored at `at`, if any.
    pub fn cell(&self, at: CellRef) -> Option<&Cell> {
        match &self.store {
            CellStore::Sparse(map) => map.get(&CellKey::from_ref(at)),
            CellStore::Grid(rows) => rows
                .get((at.row - 1) as usize)
                .and_then(|r| r.get((at.col - 1) as usize)),
        }
    }

    /// The value at `at`; `CellValue::Empty` for unpopulated cells.
    pub fn value(&self, at: CellRef) -> CellValue {
        self.cell(at).map(|c| c.value.clone()).unwrap_or_default()
    }

    /// Set the value at `at`, creating or pruning the cell record as needed.
    pub fn set_value(&mut self, at: CellRef, value: CellValue) {
        self.update_cell(at, |cell| cell.value = value);
    }

    /// Set fill formatting at `at`.
    pub fn set_fill(&mut self, at: CellRef, fill: Fill) {
        self.update_cell(at, |cell| cell.fill = Some(fill));
    }

    fn update_cell(&mut self, at: CellRef, f: impl FnOnce(&mut Cell)) {
        match &mut self.store {
            CellStore::Sparse(map) => {
                let key = CellKey::from_ref(at);
                let mut cell = map.remove(&key).unwrap_or_default();
                f(&mut cell);
                if !cell.is_truly_empty() {
                    map.insert(key, cell);
                }
            }
            CellStore::Grid(rows) => {
                let row_idx = (at.row - 1) as usize;
                let col_idx = (at.col - 1) as usize;
                if rows.len() <= row_idx {
                    rows.resize_with(row_idx + 1, Vec::new);
                }
                let row = &mut rows[row_idx];
                if row.len() <= col_idx {
                    row.resize_with(col_idx + 1, Cell::default);
                }
                f(&mut row[col_idx]);
            }
        }
    }

    /// Iterate populated cells in `(row, col)` order.
    ///
    /// Only sparse storage supports indexed iteration; grid-backed sheets
    /// return `None` and must be scanned coordinate by coordinate.
    pub fn populated(&self) -> Option<impl Iterator<Item = (CellRef, &Cell)> + '_> {
        match &self.store {
            CellStore::Sparse(map) => Some(
                map.iter()
                    .filter(|(_, cell)| !cell.is_truly_empty())
                    .map(|(key, cell)| (key.to_ref(), cell)),
            ),
            CellStore::Grid(_) => None,
        }
    }

    /// Bounding box over populated cells, or `None` when no cell is populated.
    pub fn dimensions(&self) -> Option<Range> {
        let mut bounds: Option<Range> = None;
        let mut extend = |at: CellRef| {
            let cell_range = Range::single(at);
            bounds = Some(match bounds {
                Some(b) => b.union(&cell_range),
                None => cell_range,
            });
        };
        match &self.store {
            CellStore::Sparse(map) => {
                for (key, cell) in map {
                    if !cell.is_truly_empty() {
                        extend(key.to_ref());
                    }
                }
            }
            CellStore::Grid(rows) => {
                for (r, row) in rows.iter().enumerate() {
                    for (c, cell) in row.iter().enumerate() {
                        if !cell.is_truly_empty() {
                            extend(CellRef::new(r as u32 + 1, c as u32 + 1));
                        }
                    }
                }
            }
        }
        bounds
    }

    /// Register a merge group covering `range`.
    pub fn merge(&mut self, range: Range) -> Result<(), MergeError> {
        if self.merges.iter().any(|m| m.intersect(&range).is_some()) {
            return Err(MergeError::Overlap);
        }
        self.merges.push(range);
        Ok(())
    }

    /// Freeze the given number of header rows and leading columns.
    pub fn freeze(&mut self, rows: u32, cols: u32) {
        self.pane = Some(SheetPane::frozen(rows, cols));
    }

    /// Record an explicit column width.
    pub fn set_col_width(&mut self, col: u32, width: f64) {
        self.col_widths.insert(col, width);
    }

    /// Record an explicit row height.
    pub fn set_row_height(&mut self, row: u32, height: f64) {
        self.row_heights.insert(row, height);
    }

    /// Explicitly set column widths, keyed by 1-indexed column.
    pub fn col_widths(&self) -> &BTreeMap<u32, f64> {
        &self.col_widths
    }

    /// Explicitly set row heights, keyed by 1-indexed row.
    pub fn row_heights(&self) -> &BTreeMap<u32, f64> {
        &self.row_heights
    }
}
