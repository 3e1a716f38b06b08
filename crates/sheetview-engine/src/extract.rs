//! The extraction pipeline: resolves the request to sheets, normalizes the
//! requested range, auto-includes frozen headers, enforces size ceilings and
//! materializes the structurally-annotated rows.

use serde::Serialize;
use sheetview_model::{CellRef, CellValue, Document, Range, Sheet};
use tracing::warn;

use crate::error::ExtractError;
use crate::limits::SizeLimits;
use crate::merges::{MergeCache, MergedRange};
use crate::panes::{format_freeze_panes, frozen_panes, validate_frozen_rows};
use crate::ranges::{
    calculate_header_range, calculate_range_size, expand_axis_range, merge_ranges,
    normalize_column_range,
};
use crate::resolve::{resolve_sheet_name, SheetResolution};
use crate::styles::{extract_cell_styles, CellSizeCache, CellStyleInfo};

/// A single extraction request.
#[derive(Clone, Debug)]
pub struct ExtractRequest {
    /// Sheet to extract; all sheets when absent.
    pub sheet_name: Option<String>,
    /// Cell range in A1 notation; the sheet's full bounding box when absent.
    pub range: Option<String>,
    /// Expand single cells/columns/rows toward the grid origin.
    pub expand_axis: bool,
    /// Auto-include frozen header rows above the requested range.
    pub include_header: bool,
    /// Attach per-cell fill/size metadata.
    pub include_styles: bool,
}

impl Default for ExtractRequest {
    fn default() -> Self {
        Self {
            sheet_name: None,
            range: None,
            expand_axis: false,
            include_header: true,
            include_styles: false,
        }
    }
}

/// Merge membership of a single output cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CellMerge {
    pub range: String,
    pub is_top_left: bool,
}

/// One output cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CellData {
    pub coordinate: String,
    pub value: CellValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merged: Option<CellMerge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<CellStyleInfo>,
}

/// One output row. Header rows always precede body rows.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RowData {
    pub row: u32,
    #[serde(skip_serializing_if = "is_false")]
    pub header: bool,
    pub cells: Vec<CellData>,
}

/// Extraction result for a single sheet.
#[derive(Clone, Debug, Serialize)]
pub struct SheetExtract {
    pub sheet: String,
    /// Bounding box of populated cells; omitted for an empty sheet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    pub frozen_rows: u32,
    pub frozen_cols: u32,
    /// Freeze-pane anchor notation; omitted when nothing is frozen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freeze_panes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_range: Option<String>,
    pub rows: Vec<RowData>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub merged_ranges: Vec<MergedRange>,
    /// Attached only when resolution was not a clean exact match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<SheetResolution>,
    /// Attached only when no header could be auto-included for a ranged
    /// request, explaining why and suggesting remedies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_hint: Option<String>,
}

/// Per-sheet outcome: either extracted data or a structured failure.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SheetOutcome {
    Extracted(SheetExtract),
    Failed { sheet: String, error: String },
}

impl SheetOutcome {
    pub fn as_extracted(&self) -> Option<&SheetExtract> {
        match self {
            SheetOutcome::Extracted(e) => Some(e),
            SheetOutcome::Failed { .. } => None,
        }
    }
}

/// The assembled result of one extraction request.
#[derive(Clone, Debug, Serialize)]
pub struct ExtractionReport {
    /// Resolution diagnostics when the requested sheet did not resolve.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<SheetResolution>,
    /// Full available-name list, returned when resolution failed and no
    /// range bounded a fallback scan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_sheets: Option<Vec<String>>,
    pub sheets: Vec<SheetOutcome>,
}

const HEADER_HINT: &str = "no frozen header rows are defined on this sheet, so no header rows \
     were auto-included; request a range starting at row 1, or enable axis \
     expansion to pull in the leading rows";

/// Region extraction engine. Holds the process-wide size ceilings; all other
/// state is per-request.
pub struct Extractor {
    limits: SizeLimits,
}

impl Extractor {
    pub fn new(limits: SizeLimits) -> Self {
        Self { limits }
    }

    /// Run one extraction request against `document`.
    ///
    /// Never panics and never returns an error for per-sheet problems:
    /// size-limit violations and unresolvable sheets travel as structured
    /// data so the caller can narrow scope and retry.
    pub fn extract(&self, document: &Document, req: &ExtractRequest) -> ExtractionReport {
        let names: Vec<String> = document
            .sheet_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut report_resolution = None;
        let mut sheet_resolution = None;

        let targets: Vec<&Sheet> = match &req.sheet_name {
            None => document.sheets.iter().collect(),
            Some(requested) => {
                let res = resolve_sheet_name(&names, requested);
                match &res.resolved {
                    Some(resolved) => {
                        let sheet = document
                            .sheet(resolved)
                            .expect("resolved names come from the document");
                        if !res.is_exact() {
                            sheet_resolution = Some(res.clone());
                        }
                        vec![sheet]
                    }
                    None if req.range.is_none() => {
                        // Unbounded scans of every sheet are not worth the
                        // cost; report what is available instead.
                        return ExtractionReport {
                            resolution: Some(res),
                            available_sheets: Some(names),
                            sheets: Vec::new(),
                        };
                    }
                    None => {
                        // A range bounds the per-sheet cost, so scanning all
                        // sheets is affordable.
                        warn!(
                            requested = requested.as_str(),
                            "sheet did not resolve; scanning all sheets for the requested range"
                        );
                        report_resolution = Some(res);
                        document.sheets.iter().collect()
                    }
                }
            }
        };

        let sheets = targets
            .into_iter()
            .map(|sheet| self.extract_sheet(sheet, req, sheet_resolution.clone()))
            .collect();

        ExtractionReport {
            resolution: report_resolution,
            available_sheets: None,
            sheets,
        }
    }

    fn extract_sheet(
        &self,
        sheet: &Sheet,
        req: &ExtractRequest,
        resolution: Option<SheetResolution>,
    ) -> SheetOutcome {
        let fail = |error: ExtractError| SheetOutcome::Failed {
            sheet: sheet.name.clone(),
            error: error.to_string(),
        };

        // Frozen-pane info, degraded (never fatal) when the document
        // declares an absurd frozen-row count.
        let (raw_rows, raw_cols) = frozen_panes(sheet);
        let (valid, mut frozen_rows) =
            validate_frozen_rows(raw_rows as i64, self.limits.max_frozen_rows);
        let mut frozen_cols = raw_cols;
        if !valid {
            warn!(
                sheet = %sheet.name,
                frozen_rows = raw_rows,
                limit = self.limits.max_frozen_rows,
                "frozen-row count exceeds the limit; disabling frozen panes"
            );
            frozen_rows = 0;
            frozen_cols = 0;
        }

        let dims = sheet.dimensions();
        let max_row = dims.map(|d| d.end.row).unwrap_or(1);

        // Working range: normalize bare columns, optionally expand axes,
        // then compute the header sub-range still missing above it.
        let mut effective_range = None;
        let mut header_range = None;
        let sizing_spec = match &req.range {
            Some(spec) => {
                let normalized = match normalize_column_range(spec, max_row) {
                    Ok(s) => s,
                    Err(e) => return fail(e),
                };
                let effective = if req.expand_axis {
                    expand_axis_range(&normalized)
                } else {
                    normalized
                };
                if req.include_header && frozen_rows > 0 {
                    header_range = calculate_header_range(&effective, frozen_rows);
                }
                let sizing = match &header_range {
                    Some(header) => match merge_ranges(header, &effective) {
                        Ok(s) => s,
                        Err(e) => return fail(e),
                    },
                    None => effective.clone(),
                };
                effective_range = Some(effective);
                Some(sizing)
            }
            None => dims.map(|d| d.to_string()),
        };

        // Size gate. Must run before merge-cache construction and row
        // materialization; reversed ranges are rejected here, not reordered.
        if let Some(spec) = &sizing_spec {
            let (rows, cols) = calculate_range_size(spec);
            if (rows, cols) == (0, 0) {
                return fail(ExtractError::RangeOrder {
                    spec: req.range.clone().unwrap_or_else(|| spec.clone()),
                });
            }
            if rows > self.limits.max_rows || cols > self.limits.max_cols {
                return fail(ExtractError::SizeLimitExceeded {
                    rows,
                    cols,
                    max_rows: self.limits.max_rows,
                    max_cols: self.limits.max_cols,
                });
            }
        }

        // Typed ranges for cache scoping and materialization. An effective
        // spec that survives the gate but is not A1 notation fails here.
        let planned = match (&req.range, &sizing_spec) {
            (Some(_), Some(spec)) => match Range::from_a1(spec) {
                Ok(r) => Some(r),
                Err(source) => {
                    return fail(ExtractError::InvalidRange {
                        spec: spec.clone(),
                        source,
                    })
                }
            },
            _ => None,
        };

        let cache = MergeCache::build(sheet, planned);
        let sizes = req.include_styles.then(|| CellSizeCache::build(sheet));

        // Header rows first, then body rows. The header sub-range only ever
        // covers rows above the body's start, so coordinates never repeat.
        let mut rows = Vec::new();
        if let Some(spec) = &header_range {
            match Range::from_a1(spec) {
                Ok(r) => materialize_rows(sheet, r, true, &cache, sizes.as_ref(), &mut rows),
                Err(source) => {
                    return fail(ExtractError::InvalidRange {
                        spec: spec.clone(),
                        source,
                    })
                }
            }
        }
        let body = match &effective_range {
            Some(spec) => match Range::from_a1(spec) {
                Ok(r) => Some(r),
                Err(source) => {
                    return fail(ExtractError::InvalidRange {
                        spec: spec.clone(),
                        source,
                    })
                }
            },
            None => dims,
        };
        if let Some(r) = body {
            materialize_rows(sheet, r, false, &cache, sizes.as_ref(), &mut rows);
        }

        let header_hint = (frozen_rows == 0 && req.range.is_some() && !req.expand_axis)
            .then(|| HEADER_HINT.to_string());

        SheetOutcome::Extracted(SheetExtract {
            sheet: sheet.name.clone(),
            dimensions: dims.map(|d| d.to_string()),
            frozen_rows,
            frozen_cols,
            freeze_panes: (frozen_rows > 0 || frozen_cols > 0)
                .then(|| format_freeze_panes(frozen_rows, frozen_cols)),
            requested_range: req.range.clone(),
            effective_range,
            header_range,
            rows,
            merged_ranges: cache.ranges().to_vec(),
            resolution,
            header_hint,
        })
    }
}

fn materialize_rows(
    sheet: &Sheet,
    range: Range,
    header: bool,
    cache: &MergeCache,
    sizes: Option<&CellSizeCache>,
    out: &mut Vec<RowData>,
) {
    for row in range.start.row..=range.end.row {
        let mut cells = Vec::with_capacity(range.width() as usize);
        for col in range.start.col..=range.end.col {
            let at = CellRef::new(row, col);
            let cell = sheet.cell(at);
            let mut value = cell.map(|c| c.value.clone()).unwrap_or_default();

            let merged = cache.merge_range_at(at).map(|merge| {
                let is_top_left = at == merge.start;
                // Interior cells inherit the group's anchor value so the
                // logical value is visible at every member coordinate.
                if value.is_empty() {
                    if let Some(anchor) = cache.anchor_value(merge) {
                        if !anchor.is_empty() {
                            value = anchor.clone();
                        }
                    }
                }
                CellMerge {
                    range: merge.to_string(),
                    is_top_left,
                }
            });

            let merge_interior = merged.as_ref().is_some_and(|m| !m.is_top_left);
            let style = sizes.map(|s| extract_cell_styles(cell, at, merge_interior, s));

            cells.push(CellData {
                coordinate: at.to_a1(),
                value,
                merged,
                style,
            });
        }
        out.push(RowData { row, header, cells });
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}
