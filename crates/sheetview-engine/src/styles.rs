//! Per-cell visual metadata (fill color, size) from precomputed caches.

use std::collections::BTreeMap;

use serde::Serialize;
use sheetview_model::{Cell, CellRef, Color, Sheet};

/// Render a color the way callers expect it: `#RRGGBB` from the low 6 hex
/// digits of an ARGB value, or `theme_<n>` for theme-indexed colors.
pub fn color_label(color: Color) -> String {
    match color {
        Color::Argb(argb) => format!("#{:06X}", argb & 0x00FF_FFFF),
        Color::Theme(n) => format!("theme_{n}"),
    }
}

/// Column-width / row-height cache, built in one pass per sheet and limited
/// to dimensions with an explicitly set size.
#[derive(Clone, Debug, Default)]
pub struct CellSizeCache {
    col_widths: BTreeMap<u32, f64>,
    row_heights: BTreeMap<u32, f64>,
}

impl CellSizeCache {
    pub fn build(sheet: &Sheet) -> Self {
        Self {
            col_widths: sheet.col_widths().clone(),
            row_heights: sheet.row_heights().clone(),
        }
    }

    pub fn col_width(&self, col: u32) -> Option<f64> {
        self.col_widths.get(&col).copied()
    }

    pub fn row_height(&self, row: u32) -> Option<f64> {
        self.row_heights.get(&row).copied()
    }
}

/// Fill information of a single cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FillInfo {
    pub pattern_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fg_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
}

/// Visual metadata of a single cell. Fields are omitted when absent, so an
/// unstyled cell serializes as an empty record.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CellStyleInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<FillInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl CellStyleInfo {
    pub fn is_empty(&self) -> bool {
        self.fill.is_none() && self.width.is_none() && self.height.is_none()
    }
}

/// Extract fill and size metadata for the cell at `at`.
///
/// Interior members of a merge group have no independent row/column
/// identity; they omit the size fields rather than failing.
pub fn extract_cell_styles(
    cell: Option<&Cell>,
    at: CellRef,
    merge_interior: bool,
    sizes: &CellSizeCache,
) -> CellStyleInfo {
    let mut styles = CellStyleInfo::default();

    if let Some(fill) = cell.and_then(|c| c.fill.as_ref()) {
        styles.fill = Some(FillInfo {
            pattern_type: fill.pattern.clone(),
            fg_color: fill.fg_color.map(color_label),
            bg_color: fill.bg_color.map(color_label),
        });
    }

    if !merge_interior {
        styles.width = sizes.col_width(at.col);
        styles.height = sizes.row_height(at.row);
    }

    styles
}
