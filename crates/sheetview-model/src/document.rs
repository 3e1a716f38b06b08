use serde::{Deserialize, Serialize};

use crate::Sheet;

/// An in-memory grid document: an ordered collection of sheets.
///
/// The document is the unit handed to the extraction engine. Container
/// parsing (zip/XML/binary) happens upstream; by the time a `Document`
/// exists, its sheets, cells, merges and pane metadata are fully materialized.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet.
    pub fn push_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    /// Look up a sheet by exact name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// All sheet names, in tab order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}
