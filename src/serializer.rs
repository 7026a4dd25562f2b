//! Serialization layer. Defaults to JSON via serde_json.
//!
//! Implement [`Serializer`] if the document has to live in another encoding.

use crate::document::Document;
use crate::error::{Error, Result};

/// Converts a [`Document`] to/from bytes for persistence.
pub trait Serializer: Send + Sync {
    /// Encode a document to bytes.
    fn serialize(&self, doc: &Document) -> Result<Vec<u8>>;

    /// Decode bytes back into a document. Bytes that parse but hold the wrong
    /// shape are [`Error::Corrupt`].
    fn deserialize(&self, bytes: &[u8]) -> Result<Document>;
}

/// JSON serializer with optional pretty-printing. Non-ASCII text is written
/// as-is (UTF-8), never `\u`-escaped.
#[derive(Debug, Clone, Default)]
pub struct JsonSerializer {
    pretty: bool,
}

impl JsonSerializer {
    /// Compact JSON (single line, no extra whitespace).
    pub fn new() -> Self {
        Self::default()
    }

    /// Two-space indented JSON, the layout hand-edited documents use.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Serializer for JsonSerializer {
    fn serialize(&self, doc: &Document) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(doc)
        } else {
            serde_json::to_vec(doc)
        };
        bytes.map_err(|e| Error::Internal(e.to_string()))
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Document> {
        let value: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| Error::Corrupt(e.to_string()))?;
        Document::from_value(value)
    }
}
