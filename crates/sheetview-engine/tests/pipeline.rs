use pretty_assertions::assert_eq;
use sheetview_engine::{ExtractRequest, Extractor, SheetOutcome, SizeLimits};
use sheetview_model::{CellRef, CellValue, Document, Range, Sheet};

fn sheet_with_values(name: &str, values: &[(&str, &str)]) -> Sheet {
    let mut sheet = Sheet::new(name);
    for (coord, value) in values {
        sheet.set_value(CellRef::from_a1(coord).unwrap(), CellValue::from(*value));
    }
    sheet
}

fn single_sheet_doc(sheet: Sheet) -> Document {
    let mut doc = Document::new();
    doc.push_sheet(sheet);
    doc
}

fn extract_one(doc: &Document, req: &ExtractRequest) -> SheetOutcome {
    let report = Extractor::new(SizeLimits::default()).extract(doc, req);
    assert_eq!(report.sheets.len(), 1);
    report.sheets.into_iter().next().unwrap()
}

#[test]
fn frozen_header_rows_precede_body_rows() {
    let mut sheet = sheet_with_values(
        "Data",
        &[
            ("A1", "id"),
            ("B1", "name"),
            ("A2", "unit"),
            ("B2", "label"),
            ("A4", "1"),
            ("B4", "alpha"),
            ("A5", "2"),
            ("B5", "beta"),
            ("A6", "3"),
            ("B6", "gamma"),
        ],
    );
    sheet.freeze(2, 0);
    let doc = single_sheet_doc(sheet);

    let outcome = extract_one(
        &doc,
        &ExtractRequest {
            sheet_name: Some("Data".into()),
            range: Some("A4:B6".into()),
            ..Default::default()
        },
    );

    let extract = outcome.as_extracted().unwrap();
    assert_eq!(extract.header_range.as_deref(), Some("A1:B2"));
    assert_eq!(extract.effective_range.as_deref(), Some("A4:B6"));
    assert_eq!(extract.freeze_panes.as_deref(), Some("A3"));
    assert_eq!(extract.rows.len(), 5);

    let row_numbers: Vec<u32> = extract.rows.iter().map(|r| r.row).collect();
    assert_eq!(row_numbers, vec![1, 2, 4, 5, 6]);
    assert!(extract.rows[0].header && extract.rows[1].header);
    assert!(!extract.rows[2].header);

    // No coordinate appears twice across header and body.
    let mut coords: Vec<&str> = extract
        .rows
        .iter()
        .flat_map(|r| r.cells.iter().map(|c| c.coordinate.as_str()))
        .collect();
    let total = coords.len();
    coords.sort_unstable();
    coords.dedup();
    assert_eq!(coords.len(), total);

    assert!(extract.header_hint.is_none());
}

#[test]
fn range_covering_row_one_gets_no_header_block() {
    let mut sheet = sheet_with_values("Data", &[("A1", "id"), ("A2", "x")]);
    sheet.freeze(2, 0);
    let doc = single_sheet_doc(sheet);

    let outcome = extract_one(
        &doc,
        &ExtractRequest {
            sheet_name: Some("Data".into()),
            range: Some("A1:B6".into()),
            ..Default::default()
        },
    );

    let extract = outcome.as_extracted().unwrap();
    assert_eq!(extract.header_range, None);
    assert_eq!(extract.rows.len(), 6);
    assert!(extract.rows.iter().all(|r| !r.header));
}

#[test]
fn reversed_range_is_rejected_not_reordered() {
    let doc = single_sheet_doc(sheet_with_values("Data", &[("A1", "x")]));

    let outcome = extract_one(
        &doc,
        &ExtractRequest {
            sheet_name: Some("Data".into()),
            range: Some("D10:A1".into()),
            ..Default::default()
        },
    );

    match outcome {
        SheetOutcome::Failed { sheet, error } => {
            assert_eq!(sheet, "Data");
            assert!(error.contains("D10:A1"));
            assert!(error.contains("order"));
        }
        SheetOutcome::Extracted(_) => panic!("reversed range must fail the sheet"),
    }
}

#[test]
fn size_gate_rejects_oversized_requests_with_guidance() {
    let doc = single_sheet_doc(sheet_with_values("Data", &[("A1", "x")]));
    let extractor = Extractor::new(SizeLimits::new(10, 5, 100));

    let report = extractor.extract(
        &doc,
        &ExtractRequest {
            sheet_name: Some("Data".into()),
            range: Some("A1:A50".into()),
            ..Default::default()
        },
    );

    match &report.sheets[0] {
        SheetOutcome::Failed { error, .. } => {
            assert!(error.contains("50 rows"));
            assert!(error.contains("narrower range"));
        }
        SheetOutcome::Extracted(_) => panic!("oversized range must fail the sheet"),
    }
}

#[test]
fn size_gate_applies_to_whole_sheet_requests() {
    let mut sheet = Sheet::new("Data");
    for row in 1..=20 {
        sheet.set_value(CellRef::new(row, 1), CellValue::from(row as f64));
    }
    let doc = single_sheet_doc(sheet);
    let extractor = Extractor::new(SizeLimits::new(10, 5, 100));

    let report = extractor.extract(
        &doc,
        &ExtractRequest {
            sheet_name: Some("Data".into()),
            ..Default::default()
        },
    );
    assert!(matches!(report.sheets[0], SheetOutcome::Failed { .. }));
}

#[test]
fn unresolved_sheet_without_range_lists_available_sheets() {
    let mut doc = Document::new();
    doc.push_sheet(Sheet::new("Data"));
    doc.push_sheet(Sheet::new("Other"));

    let report = Extractor::new(SizeLimits::default()).extract(
        &doc,
        &ExtractRequest {
            sheet_name: Some("Missing".into()),
            ..Default::default()
        },
    );

    assert!(report.sheets.is_empty());
    let resolution = report.resolution.unwrap();
    assert_eq!(resolution.resolved, None);
    assert_eq!(
        report.available_sheets,
        Some(vec!["Data".to_string(), "Other".to_string()])
    );
}

#[test]
fn unresolved_sheet_with_range_falls_back_to_all_sheets() {
    let mut doc = Document::new();
    doc.push_sheet(sheet_with_values("Data", &[("A1", "x")]));
    doc.push_sheet(sheet_with_values("Other", &[("A1", "y")]));

    let report = Extractor::new(SizeLimits::default()).extract(
        &doc,
        &ExtractRequest {
            sheet_name: Some("Missing".into()),
            range: Some("A1:B2".into()),
            ..Default::default()
        },
    );

    assert_eq!(report.sheets.len(), 2);
    assert!(report.resolution.is_some());
}

#[test]
fn normalized_resolution_attaches_diagnostics_to_the_sheet() {
    let doc = single_sheet_doc(sheet_with_values("Summary", &[("A1", "x")]));

    let outcome = extract_one(
        &doc,
        &ExtractRequest {
            sheet_name: Some("  summary ".into()),
            ..Default::default()
        },
    );

    let extract = outcome.as_extracted().unwrap();
    assert_eq!(extract.sheet, "Summary");
    let resolution = extract.resolution.as_ref().unwrap();
    assert_eq!(resolution.resolved.as_deref(), Some("Summary"));
}

#[test]
fn exact_resolution_attaches_no_diagnostics() {
    let doc = single_sheet_doc(sheet_with_values("Data", &[("A1", "x")]));
    let outcome = extract_one(
        &doc,
        &ExtractRequest {
            sheet_name: Some("Data".into()),
            ..Default::default()
        },
    );
    assert!(outcome.as_extracted().unwrap().resolution.is_none());
}

#[test]
fn excessive_frozen_rows_degrade_to_no_header() {
    let mut sheet = sheet_with_values("Data", &[("A1", "h"), ("A4", "x")]);
    sheet.freeze(150, 3);
    let doc = single_sheet_doc(sheet);
    let extractor = Extractor::new(SizeLimits::new(1_000, 100, 100));

    let report = extractor.extract(
        &doc,
        &ExtractRequest {
            sheet_name: Some("Data".into()),
            range: Some("A4:B6".into()),
            ..Default::default()
        },
    );

    let extract = report.sheets[0].as_extracted().unwrap();
    // Both axes are zeroed; disabling one without the other is unsupported.
    assert_eq!((extract.frozen_rows, extract.frozen_cols), (0, 0));
    assert_eq!(extract.freeze_panes, None);
    assert_eq!(extract.header_range, None);
    assert!(extract.header_hint.is_some());
}

#[test]
fn merge_metadata_and_anchor_propagation() {
    let mut sheet = sheet_with_values("Data", &[("A1", "title"), ("C1", "other")]);
    sheet.merge(Range::from_a1("A1:B2").unwrap()).unwrap();
    let doc = single_sheet_doc(sheet);

    let outcome = extract_one(
        &doc,
        &ExtractRequest {
            sheet_name: Some("Data".into()),
            range: Some("A1:C2".into()),
            ..Default::default()
        },
    );

    let extract = outcome.as_extracted().unwrap();
    assert_eq!(extract.merged_ranges.len(), 1);
    assert_eq!(extract.merged_ranges[0].range, "A1:B2");
    assert_eq!(extract.merged_ranges[0].anchor.coordinate, "A1");

    let cell = |coord: &str| {
        extract
            .rows
            .iter()
            .flat_map(|r| &r.cells)
            .find(|c| c.coordinate == coord)
            .unwrap()
    };

    let top_left = cell("A1");
    assert!(top_left.merged.as_ref().unwrap().is_top_left);
    assert_eq!(top_left.value, CellValue::from("title"));

    // Interior members report the group and inherit the anchor value.
    let interior = cell("B2");
    let merged = interior.merged.as_ref().unwrap();
    assert!(!merged.is_top_left);
    assert_eq!(merged.range, "A1:B2");
    assert_eq!(interior.value, CellValue::from("title"));

    // Cells outside the merge carry no merge metadata.
    assert!(cell("C1").merged.is_none());
}

#[test]
fn bare_column_spec_is_normalized_against_sheet_extent() {
    let sheet = sheet_with_values("Data", &[("B1", "a"), ("B5", "b")]);
    let doc = single_sheet_doc(sheet);

    let outcome = extract_one(
        &doc,
        &ExtractRequest {
            sheet_name: Some("Data".into()),
            range: Some("b".into()),
            ..Default::default()
        },
    );

    let extract = outcome.as_extracted().unwrap();
    assert_eq!(extract.requested_range.as_deref(), Some("b"));
    assert_eq!(extract.effective_range.as_deref(), Some("B1:B5"));
    assert_eq!(extract.rows.len(), 5);
}

#[test]
fn reversed_column_spec_fails_during_normalization() {
    let doc = single_sheet_doc(sheet_with_values("Data", &[("A1", "x")]));
    let outcome = extract_one(
        &doc,
        &ExtractRequest {
            sheet_name: Some("Data".into()),
            range: Some("K:J".into()),
            ..Default::default()
        },
    );
    assert!(matches!(outcome, SheetOutcome::Failed { .. }));
}

#[test]
fn axis_expansion_pulls_in_leading_rows_and_suppresses_the_hint() {
    let sheet = sheet_with_values("Data", &[("C5", "v")]);
    let doc = single_sheet_doc(sheet);

    let outcome = extract_one(
        &doc,
        &ExtractRequest {
            sheet_name: Some("Data".into()),
            range: Some("C5".into()),
            expand_axis: true,
            ..Default::default()
        },
    );

    let extract = outcome.as_extracted().unwrap();
    assert_eq!(extract.effective_range.as_deref(), Some("C1:C5"));
    assert_eq!(extract.rows.len(), 5);
    assert!(extract.header_hint.is_none());
}

#[test]
fn ranged_request_without_frozen_rows_gets_a_header_hint() {
    let doc = single_sheet_doc(sheet_with_values("Data", &[("A1", "x")]));
    let outcome = extract_one(
        &doc,
        &ExtractRequest {
            sheet_name: Some("Data".into()),
            range: Some("A1:B2".into()),
            ..Default::default()
        },
    );
    assert!(outcome.as_extracted().unwrap().header_hint.is_some());
}

#[test]
fn styles_are_attached_only_on_request() {
    let mut sheet = sheet_with_values("Data", &[("A1", "x")]);
    sheet.set_col_width(1, 12.0);
    let doc = single_sheet_doc(sheet);

    let plain = extract_one(
        &doc,
        &ExtractRequest {
            sheet_name: Some("Data".into()),
            range: Some("A1:A1".into()),
            ..Default::default()
        },
    );
    assert!(plain.as_extracted().unwrap().rows[0].cells[0].style.is_none());

    let styled = extract_one(
        &doc,
        &ExtractRequest {
            sheet_name: Some("Data".into()),
            range: Some("A1:A1".into()),
            include_styles: true,
            ..Default::default()
        },
    );
    let style = styled.as_extracted().unwrap().rows[0].cells[0]
        .style
        .as_ref()
        .unwrap();
    assert_eq!(style.width, Some(12.0));
}

#[test]
fn whole_document_extraction_covers_every_sheet() {
    let mut doc = Document::new();
    doc.push_sheet(sheet_with_values("First", &[("A1", "x")]));
    doc.push_sheet(Sheet::new("Empty"));

    let report = Extractor::new(SizeLimits::default()).extract(&doc, &ExtractRequest::default());
    assert_eq!(report.sheets.len(), 2);

    let first = report.sheets[0].as_extracted().unwrap();
    assert_eq!(first.dimensions.as_deref(), Some("A1"));
    assert_eq!(first.rows.len(), 1);

    // Empty sheets have no bounding box and materialize no rows.
    let empty = report.sheets[1].as_extracted().unwrap();
    assert_eq!(empty.dimensions, None);
    assert!(empty.rows.is_empty());
}
