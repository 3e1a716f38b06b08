//! Content search across populated cells.

use serde::Serialize;
use sheetview_model::{CellRef, CellValue, Document, Sheet};
use tracing::warn;

use crate::access::CellAccess;

/// A content-search request.
#[derive(Clone, Debug)]
pub struct SearchRequest {
    /// Space-separated keywords; a cell matches when its textual value
    /// contains every keyword (case-sensitive).
    pub query: String,
    /// Sheet to search; all sheets when absent. A named sheet with zero
    /// matches falls back to scanning every other sheet.
    pub sheet_name: Option<String>,
    /// Include sibling non-empty cells of the matching row for context.
    pub include_row_data: bool,
    /// Cap on returned matches.
    pub max_results: usize,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            sheet_name: None,
            include_row_data: false,
            max_results: 50,
        }
    }
}

/// Sibling cell carried as row context.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RowCell {
    pub coordinate: String,
    pub value: CellValue,
}

/// One matching cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchMatch {
    pub sheet: String,
    pub coordinate: String,
    pub value: CellValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_data: Option<Vec<RowCell>>,
}

/// Result of a content search.
#[derive(Clone, Debug, Serialize)]
pub struct SearchReport {
    pub query: String,
    pub match_count: usize,
    pub matches: Vec<SearchMatch>,
}

/// Scan populated cells for the request's keywords (logical AND across
/// keywords, case-sensitive substring match).
pub fn search_cells(document: &Document, req: &SearchRequest) -> SearchReport {
    let keywords: Vec<&str> = req.query.split_whitespace().collect();

    let mut matches = Vec::new();
    match &req.sheet_name {
        Some(name) => {
            if let Some(sheet) = document.sheet(name) {
                search_sheet(sheet, &keywords, req, &mut matches);
            }
            if matches.is_empty() {
                warn!(
                    sheet = name.as_str(),
                    "no matches on the requested sheet; scanning remaining sheets"
                );
                for sheet in document.sheets.iter().filter(|s| &s.name != name) {
                    search_sheet(sheet, &keywords, req, &mut matches);
                }
            }
        }
        None => {
            for sheet in &document.sheets {
                search_sheet(sheet, &keywords, req, &mut matches);
            }
        }
    }

    SearchReport {
        query: req.query.clone(),
        match_count: matches.len(),
        matches,
    }
}

fn search_sheet(
    sheet: &Sheet,
    keywords: &[&str],
    req: &SearchRequest,
    matches: &mut Vec<SearchMatch>,
) {
    let Some(bounds) = sheet.dimensions() else {
        return;
    };
    let access = CellAccess::select(sheet);
    let populated = access.populated_in(bounds);

    for (at, cell) in &populated {
        if matches.len() >= req.max_results {
            return;
        }
        let text = cell.value.render_text();
        if !keywords.iter().all(|kw| text.contains(kw)) {
            continue;
        }

        let row_data = req.include_row_data.then(|| {
            populated
                .iter()
                .filter(|(other, _)| other.row == at.row && other.col != at.col)
                .map(|(other, other_cell)| RowCell {
                    coordinate: other.to_a1(),
                    value: other_cell.value.clone(),
                })
                .collect::<Vec<_>>()
        });

        matches.push(SearchMatch {
            sheet: sheet.name.clone(),
            coordinate: at.to_a1(),
            value: cell.value.clone(),
            row_data,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        let mut first = Sheet::new("First");
        first.set_value(CellRef::new(1, 1), CellValue::from("quarterly revenue"));
        first.set_value(CellRef::new(1, 2), CellValue::from(1200.0));
        first.set_value(CellRef::new(2, 1), CellValue::from("costs"));

        let mut second = Sheet::new("Second");
        second.set_value(CellRef::new(3, 3), CellValue::from("revenue forecast"));

        let mut document = Document::new();
        document.push_sheet(first);
        document.push_sheet(second);
        document
    }

    #[test]
    fn all_keywords_must_match() {
        let report = search_cells(
            &doc(),
            &SearchRequest {
                query: "quarterly revenue".into(),
                ..Default::default()
            },
        );
        assert_eq!(report.match_count, 1);
        assert_eq!(report.matches[0].coordinate, "A1");

        let none = search_cells(
            &doc(),
            &SearchRequest {
                query: "quarterly forecast".into(),
                ..Default::default()
            },
        );
        assert_eq!(none.match_count, 0);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let report = search_cells(
            &doc(),
            &SearchRequest {
                query: "Revenue".into(),
                ..Default::default()
            },
        );
        assert_eq!(report.match_count, 0);
    }

    #[test]
    fn named_sheet_miss_falls_back_to_other_sheets() {
        let report = search_cells(
            &doc(),
            &SearchRequest {
                query: "forecast".into(),
                sheet_name: Some("First".into()),
                ..Default::default()
            },
        );
        assert_eq!(report.match_count, 1);
        assert_eq!(report.matches[0].sheet, "Second");
    }

    #[test]
    fn row_data_carries_non_empty_siblings_only() {
        let report = search_cells(
            &doc(),
            &SearchRequest {
                query: "quarterly".into(),
                include_row_data: true,
                ..Default::default()
            },
        );
        let row_data = report.matches[0].row_data.as_ref().unwrap();
        assert_eq!(row_data.len(), 1);
        assert_eq!(row_data[0].coordinate, "B1");
    }

    #[test]
    fn match_cap_bounds_output() {
        let report = search_cells(
            &doc(),
            &SearchRequest {
                query: "e".into(),
                max_results: 1,
                ..Default::default()
            },
        );
        assert_eq!(report.match_count, 1);
    }
}
