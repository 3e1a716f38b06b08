use sheetview_model::RangeParseError;
use thiserror::Error;

/// Errors surfaced by the extraction engine.
///
/// Sheet-not-found/ambiguous outcomes and frozen-row violations are not
/// errors: the former travel as resolution metadata on the report, the
/// latter degrade to "no header" output.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Reversed range specification.
    #[error(
        "invalid cell range '{spec}': the range must be given in top-left to \
         bottom-right order (e.g. 'A1:Z100')"
    )]
    RangeOrder { spec: String },

    /// Range specification that does not parse as A1 notation.
    #[error("invalid cell range '{spec}': {source}")]
    InvalidRange {
        spec: String,
        #[source]
        source: RangeParseError,
    },

    /// The requested region exceeds the configured size ceilings.
    #[error(
        "requested region is {rows} rows x {cols} columns, which exceeds the \
         limit of {max_rows} rows x {max_cols} columns; specify a narrower \
         range and retry"
    )]
    SizeLimitExceeded {
        rows: u32,
        cols: u32,
        max_rows: u32,
        max_cols: u32,
    },

    /// The document could not be materialized. Fatal; recovering from a
    /// corrupted container is out of this engine's remit.
    #[error("failed to load document: {0}")]
    DocumentLoad(String),
}
