//! Pluggable storage backends.
//!
//! Implement [`Storage`] to keep the document somewhere other than a local
//! file. [`MemoryStorage`] exists so the store logic can be exercised without
//! touching the filesystem.

use crate::document::Document;
use crate::error::Result;
use crate::persist::{atomic_write, load};
use crate::serializer::{JsonSerializer, Serializer};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};

/// Where a [`RecordStore`](crate::RecordStore) reads and writes its document.
///
/// Both calls move the whole document; there is no partial I/O.
pub trait Storage: Send + Sync {
    /// Read the document. A backend that has never been written must
    /// initialize itself to [`Document::empty`], persist that, and return it.
    fn load(&self) -> Result<Document>;

    /// Replace the stored document, keeping `doc.shape`.
    fn save(&self, doc: &Document) -> Result<()>;
}

// ---- file --------------------------------------------------------------------

/// A JSON file on local disk, replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    serializer: JsonSerializer,
}

impl FileStorage {
    /// Pretty-printed file at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_serializer(path, JsonSerializer::pretty())
    }

    /// File at `path` written with `serializer`.
    pub fn with_serializer(path: impl AsRef<Path>, serializer: JsonSerializer) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            serializer,
        }
    }

    /// Path to the backing JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn load(&self) -> Result<Document> {
        if let Some(doc) = load(&self.path, &self.serializer)? {
            return Ok(doc);
        }
        tracing::info!(path = %self.path.display(), "initializing empty document");
        let doc = Document::empty();
        self.save(&doc)?;
        Ok(doc)
    }

    fn save(&self, doc: &Document) -> Result<()> {
        let bytes = self.serializer.serialize(doc)?;
        atomic_write(&self.path, &bytes)
    }
}

// ---- memory ------------------------------------------------------------------

/// Keeps the document in memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    doc: RwLock<Option<Document>>,
}

impl MemoryStorage {
    /// Storage that starts out never-written.
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with `doc`, e.g. to test a wrapped document.
    pub fn with_document(doc: Document) -> Self {
        Self {
            doc: RwLock::new(Some(doc)),
        }
    }

    /// Copy of what is currently stored, `None` if nothing was ever saved.
    #[must_use]
    pub fn snapshot(&self) -> Option<Document> {
        self.doc.read().clone()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Document> {
        let mut slot = self.doc.write();
        Ok(slot.get_or_insert_with(Document::empty).clone())
    }

    fn save(&self, doc: &Document) -> Result<()> {
        *self.doc.write() = Some(doc.clone());
        Ok(())
    }
}
