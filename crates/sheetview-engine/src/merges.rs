//! Merge-group discovery and anchor-value resolution.

use std::collections::HashMap;

use serde::Serialize;
use sheetview_model::{CellRef, CellValue, Range, Sheet};

use crate::access::CellAccess;

/// The cell whose value represents an entire merge group.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MergeAnchor {
    pub coordinate: String,
    pub value: CellValue,
}

/// One merge group as reported to callers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MergedRange {
    pub range: String,
    pub anchor: MergeAnchor,
}

/// Merge information scoped to a planned extraction range.
///
/// The coordinate map covers only the intersection of each merge group with
/// the planned range: a merge spanning far beyond the requested view must
/// not inflate the cache. An empty cache means "no merge information
/// present" and is not an error.
#[derive(Default)]
pub struct MergeCache {
    cell_map: HashMap<CellRef, Range>,
    anchor_values: HashMap<Range, CellValue>,
    ranges: Vec<MergedRange>,
}

impl MergeCache {
    /// Build the cache for `sheet`, bounded by `planned` (or the sheet's own
    /// bounding box when no range is planned).
    pub fn build(sheet: &Sheet, planned: Option<Range>) -> Self {
        let Some(bounds) = planned.or_else(|| sheet.dimensions()) else {
            return Self::default();
        };
        if sheet.merges.is_empty() {
            return Self::default();
        }

        let access = CellAccess::select(sheet);
        let mut cache = Self::default();

        for merge in &sheet.merges {
            let Some(intersection) = merge.intersect(&bounds) else {
                continue;
            };

            let (anchor_at, anchor_value) = resolve_anchor(sheet, &access, merge);

            for row in intersection.start.row..=intersection.end.row {
                for col in intersection.start.col..=intersection.end.col {
                    cache.cell_map.insert(CellRef::new(row, col), *merge);
                }
            }

            cache.anchor_values.insert(*merge, anchor_value.clone());
            cache.ranges.push(MergedRange {
                range: merge.to_string(),
                anchor: MergeAnchor {
                    coordinate: anchor_at.to_a1(),
                    value: anchor_value,
                },
            });
        }

        cache
    }

    /// True when no merge group intersects the planned range.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The merge group covering `at`, if `at` lies inside the planned range.
    pub fn merge_range_at(&self, at: CellRef) -> Option<&Range> {
        self.cell_map.get(&at)
    }

    /// The anchor value of a merge group; `CellValue::Empty` when the group
    /// is entirely empty.
    pub fn anchor_value(&self, range: &Range) -> Option<&CellValue> {
        self.anchor_values.get(range)
    }

    /// Descriptors for every intersecting merge group, in sheet order.
    pub fn ranges(&self) -> &[MergedRange] {
        &self.ranges
    }
}

/// Anchor resolution: the top-left cell value when non-empty; otherwise the
/// populated cell with the smallest `(row, col)` inside the group's own box;
/// for an entirely empty group, the top-left coordinate with an empty value.
fn resolve_anchor(sheet: &Sheet, access: &CellAccess<'_>, merge: &Range) -> (CellRef, CellValue) {
    let top_left = merge.start;
    let value = sheet.value(top_left);
    if !value.is_empty() {
        return (top_left, value);
    }

    match access.populated_in(*merge).into_iter().next() {
        Some((at, cell)) => (at, cell.value.clone()),
        None => (top_left, CellValue::Empty),
    }
}
