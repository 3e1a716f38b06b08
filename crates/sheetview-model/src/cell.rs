use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{CellRef, CellValue, Fill};

/// Maximum rows per sheet (1,048,576).
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum columns per sheet (16,384).
pub const MAX_COLS: u32 = 16_384;

const COL_BITS: u32 = 14; // 2^14 = 16,384 columns.
const COL_MASK: u64 = (1u64 << COL_BITS) - 1;

/// Compact key used for sparse cell storage.
///
/// The key packs a 1-indexed `(row, col)` pair into a `u64`:
///
/// ```text
/// key = ((row - 1) << 14) | (col - 1)
/// ```
///
/// This supports the maximum grid dimensions while keeping the key within 34
/// bits (JSON-safe for JavaScript numbers). Keys order by `(row, col)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(transparent)]
pub struct CellKey(u64);

impl CellKey {
    /// Encode a 1-indexed `(row, col)` coordinate into a compact [`CellKey`].
    #[inline]
    pub fn new(row: u32, col: u32) -> Self {
        assert!(row >= 1 && row <= MAX_ROWS, "row out of grid bounds: {row}");
        assert!(col >= 1 && col <= MAX_COLS, "col out of grid bounds: {col}");
        Self((((row - 1) as u64) << COL_BITS) | ((col - 1) as u64))
    }

    /// Decode the row component (1-indexed).
    #[inline]
    pub const fn row(self) -> u32 {
        (self.0 >> COL_BITS) as u32 + 1
    }

    /// Decode the column component (1-indexed).
    #[inline]
    pub const fn col(self) -> u32 {
        (self.0 & COL_MASK) as u32 + 1
    }

    /// Raw packed value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Convert to a [`CellRef`].
    #[inline]
    pub const fn to_ref(self) -> CellRef {
        CellRef::new(self.row(), self.col())
    }

    /// Create a key from a [`CellRef`].
    #[inline]
    pub fn from_ref(cell: CellRef) -> Self {
        Self::new(cell.row, cell.col)
    }
}

impl<'de> Deserialize<'de> for CellKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = u64::deserialize(deserializer)?;
        let row = (raw >> COL_BITS) + 1;
        let col = (raw & COL_MASK) + 1;

        if row > MAX_ROWS as u64 {
            return Err(D::Error::custom(format!(
                "CellKey row out of grid bounds: {row}"
            )));
        }
        if col > MAX_COLS as u64 {
            return Err(D::Error::custom(format!(
                "CellKey col out of grid bounds: {col}"
            )));
        }

        Ok(CellKey(raw))
    }
}

impl From<CellKey> for u64 {
    fn from(value: CellKey) -> Self {
        value.0
    }
}

impl From<CellRef> for CellKey {
    fn from(value: CellRef) -> Self {
        Self::from_ref(value)
    }
}

/// A single cell record.
///
/// Cells are stored sparsely: when a cell is "truly empty" (no value, no
/// fill), it is removed from the sheet map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// The cell's value.
    #[serde(default)]
    pub value: CellValue,

    /// Fill formatting, if the cell carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            value: CellValue::Empty,
            fill: None,
        }
    }
}

impl Cell {
    /// Create a new cell with the given value.
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    /// Returns true if this cell has no observable content or formatting.
    ///
    /// Such cells should not be stored in the sparse map.
    pub fn is_truly_empty(&self) -> bool {
        self.value == CellValue::Empty && self.fill.is_none()
    }
}
