//! JSON rendering for converted documents.

use crate::error::{Error, Result};
use crate::model::PageDocument;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &PageDocument, format: JsonFormat) -> Result<String> {
    serialize(doc, format)
}

/// Convert several documents to a JSON array.
pub fn to_json_all(docs: &[PageDocument], format: JsonFormat) -> Result<String> {
    serialize(docs, format)
}

fn serialize<T: serde::Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
