//! Cell-access capability over a sheet's storage.
//!
//! Sparse-backed sheets expose an index of populated cells; grid-backed
//! sheets only support coordinate-by-coordinate scanning. The capability is
//! chosen once, at construction, from what the storage exposes; consumers
//! never probe the sheet themselves.

use sheetview_model::{Cell, CellRef, Range, Sheet};

/// How populated cells within a bounding box are enumerated.
pub enum CellAccess<'a> {
    /// Iterate the sheet's populated-cell index, filtered to the box.
    Indexed(&'a Sheet),
    /// Walk every coordinate of the box and probe the sheet.
    Scan(&'a Sheet),
}

impl<'a> CellAccess<'a> {
    /// Select the access strategy the sheet's storage supports.
    pub fn select(sheet: &'a Sheet) -> Self {
        if sheet.populated().is_some() {
            CellAccess::Indexed(sheet)
        } else {
            CellAccess::Scan(sheet)
        }
    }

    /// Populated cells with a non-empty value inside `bounds`, in
    /// `(row, col)` order.
    pub fn populated_in(&self, bounds: Range) -> Vec<(CellRef, &'a Cell)> {
        match self {
            CellAccess::Indexed(sheet) => {
                let iter = sheet
                    .populated()
                    .expect("indexed access is only selected for indexed storage");
                iter.filter(|(at, cell)| bounds.contains(*at) && !cell.value.is_empty())
                    .collect()
            }
            CellAccess::Scan(sheet) => {
                let mut out = Vec::new();
                for row in bounds.start.row..=bounds.end.row {
                    for col in bounds.start.col..=bounds.end.col {
                        let at = CellRef::new(row, col);
                        if let Some(cell) = sheet.cell(at) {
                            if !cell.value.is_empty() {
                                out.push((at, cell));
                            }
                        }
                    }
                }
                out
            }
        }
    }
}
