//! `sheetview-engine` extracts bounded, structurally-annotated regions from
//! in-memory grid documents.
//!
//! Given a [`Document`](sheetview_model::Document) and a caller-supplied
//! selection (sheet name, cell range, formatting flags), the engine resolves
//! ambiguous sheet names, normalizes and expands range notation,
//! auto-includes frozen header rows, propagates merged-cell values and
//! enforces hard size ceilings so that a hostile or corrupted document
//! cannot drive unbounded work.
//!
//! Each request runs synchronously to completion on its own document
//! instance; the only state shared across requests is the read-only
//! [`SizeLimits`] configuration.

mod access;
mod error;
mod extract;
mod limits;
mod load;
mod merges;
mod panes;
mod ranges;
mod resolve;
mod search;
mod styles;

pub use access::CellAccess;
pub use error::ExtractError;
pub use extract::{
    CellData, CellMerge, ExtractRequest, ExtractionReport, Extractor, RowData, SheetExtract,
    SheetOutcome,
};
pub use limits::SizeLimits;
pub use load::load_document;
pub use merges::{MergeAnchor, MergeCache, MergedRange};
pub use panes::{format_freeze_panes, frozen_panes, validate_frozen_rows};
pub use ranges::{
    calculate_header_range, calculate_range_size, expand_axis_range, merge_ranges,
    normalize_column_range,
};
pub use resolve::{resolve_sheet_name, ResolutionKind, SheetResolution};
pub use search::{search_cells, RowCell, SearchMatch, SearchReport, SearchRequest};
pub use styles::{color_label, extract_cell_styles, CellSizeCache, CellStyleInfo, FillInfo};
