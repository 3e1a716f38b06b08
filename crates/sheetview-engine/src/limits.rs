use serde::{Deserialize, Serialize};

/// Hard ceilings on the amount of work a single extraction may perform.
///
/// Constructed once per process and passed into the pipeline; never mutated
/// during extraction. The caps exist so that a hostile or corrupted document
/// (or an overly broad request) cannot drive unbounded row materialization.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeLimits {
    /// Maximum rows a single extraction may materialize.
    pub max_rows: u32,
    /// Maximum columns a single extraction may materialize.
    pub max_cols: u32,
    /// Maximum frozen-row count honored for header auto-inclusion.
    pub max_frozen_rows: u32,
}

impl SizeLimits {
    pub const fn new(max_rows: u32, max_cols: u32, max_frozen_rows: u32) -> Self {
        Self {
            max_rows,
            max_cols,
            max_frozen_rows,
        }
    }
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self::new(1_000, 100, 100)
    }
}
