use serde::{Deserialize, Serialize};

/// A fill color, either a literal ARGB value or an index into the document's
/// theme palette.
///
/// The engine does not resolve theme palettes; theme colors are carried by
/// index and rendered symbolically downstream.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Color {
    /// Literal `0xAARRGGBB` value.
    Argb(u32),
    /// Theme palette slot index.
    Theme(u32),
}

/// Fill (background) formatting of a cell.
///
/// A cell is considered filled only when a pattern is present; pattern names
/// are carried verbatim from the source document (`solid`, `gray125`, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<Color>,
}

impl Fill {
    /// Solid fill with the given foreground color.
    pub fn solid(fg: Color) -> Self {
        Self {
            pattern: "solid".to_string(),
            fg_color: Some(fg),
            bg_color: None,
        }
    }
}
