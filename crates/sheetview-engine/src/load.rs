//! Document ingestion from the serialized model schema.

use sheetview_model::Document;

use crate::error::ExtractError;

/// Materialize a [`Document`] from its JSON schema.
///
/// Load failures are fatal: a document that does not deserialize is treated
/// as a corrupted container, which is out of this engine's remit to repair.
pub fn load_document(json: &str) -> Result<Document, ExtractError> {
    serde_json::from_str(json).map_err(|e| ExtractError::DocumentLoad(e.to_string()))
}
