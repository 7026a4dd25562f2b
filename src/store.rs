//! Core store type and builder.

use crate::backend::{FileStorage, Storage};
use crate::document::Document;
use crate::error::{Error, Result};
use crate::record::Record;
use crate::serializer::JsonSerializer;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

/// Candidate record store on top of a [`Storage`] backend.
///
/// Every operation is a full load, mutate, save cycle against the backend;
/// nothing is cached between calls. Cycles are serialized by an internal
/// mutex, so two requests in the same process never interleave. Separate
/// processes sharing a file still race (last writer wins).
pub struct RecordStore<S> {
    storage: S,
    lock: Mutex<()>,
}

impl RecordStore<FileStorage> {
    /// Store backed by the JSON file at `path`, pretty-printed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder(path).build()
    }

    /// Start configuring a file-backed store. Call
    /// [`.build()`](RecordStoreBuilder::build) when ready.
    pub fn builder(path: impl AsRef<Path>) -> RecordStoreBuilder {
        RecordStoreBuilder::new(path)
    }
}

impl<S: Storage> RecordStore<S> {
    /// Wrap an already-configured backend.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            lock: Mutex::new(()),
        }
    }

    /// The backend.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the whole document, initializing it if it doesn't exist yet.
    pub fn load(&self) -> Result<Document> {
        self.storage.load()
    }

    /// Persist `doc` in its own shape.
    pub fn save(&self, doc: &Document) -> Result<()> {
        self.storage.save(doc).map_err(|err| {
            tracing::error!(error = %err, records = doc.len(), "failed to persist document");
            err
        })
    }

    // ---- reads ----

    /// All records in document order.
    ///
    /// A corrupt document reads as empty (and is logged) so the listing stays
    /// available; any other load failure is returned.
    pub fn list(&self) -> Result<Vec<Record>> {
        let _guard = self.lock.lock();
        match self.storage.load() {
            Ok(doc) => Ok(doc.records),
            Err(Error::Corrupt(msg)) => {
                tracing::error!(error = %msg, "document is corrupt, listing as empty");
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    // ---- writes ----

    /// Register a new record built from `fields` and return it.
    ///
    /// The ID is one more than the largest ID currently present (0 when there
    /// are none). Deleting the top record therefore frees its ID for reuse.
    pub fn create(&self, fields: Record) -> Result<Record> {
        let _guard = self.lock.lock();
        let mut doc = self.storage.load()?;
        let id = next_id(&doc)?;
        let record = Record::registration(fields, id);
        doc.records.push(record.clone());
        self.save(&doc)?;
        tracing::info!(id, total = doc.len(), "record created");
        Ok(record)
    }

    /// Shallow-merge `patch` into the first record whose `ID` is `id`.
    ///
    /// Only that first match changes, even if the document holds duplicates.
    pub fn update_by_id(&self, id: i64, patch: Record) -> Result<()> {
        let _guard = self.lock.lock();
        let mut doc = self.storage.load()?;
        let Some(record) = doc.records.iter_mut().find(|r| r.id() == Some(id)) else {
            tracing::warn!(id, "update: no such record");
            return Err(Error::NotFound(id));
        };
        if patch.id.is_some() {
            tracing::debug!(id, "update: ignoring ID in patch");
        }
        record.merge(patch);
        self.save(&doc)?;
        tracing::info!(id, "record updated");
        Ok(())
    }

    /// Remove every record whose `ID` is `id` and return how many went.
    ///
    /// Unlike [`update_by_id`](Self::update_by_id) this takes out all
    /// duplicates. When nothing matches, storage is not written.
    pub fn delete_by_id(&self, id: i64) -> Result<usize> {
        let _guard = self.lock.lock();
        let mut doc = self.storage.load()?;
        let before = doc.len();
        doc.records.retain(|r| r.id() != Some(id));
        let removed = before - doc.len();
        if removed == 0 {
            tracing::warn!(id, "delete: no such record");
            return Err(Error::NotFound(id));
        }
        self.save(&doc)?;
        tracing::info!(id, removed, "record deleted");
        Ok(removed)
    }

    /// Relabel `Prediccion_IA` on every record from its experience and return
    /// the full updated set.
    pub fn recompute_classification(&self) -> Result<Vec<Record>> {
        let _guard = self.lock.lock();
        let mut doc = self.storage.load()?;
        for record in &mut doc.records {
            record.classify();
        }
        self.save(&doc)?;
        tracing::info!(records = doc.len(), "classification recomputed");
        Ok(doc.records)
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for RecordStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}

fn next_id(doc: &Document) -> Result<i64> {
    let max = doc.records.iter().filter_map(Record::id).max().unwrap_or(0);
    max.checked_add(1)
        .ok_or_else(|| Error::Internal(format!("ID space exhausted after {max}")))
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures a file-backed [`RecordStore`].
///
/// ```rust,no_run
/// use candidate_store::RecordStore;
///
/// let store = RecordStore::builder("data/base_del_proto.json")
///     .pretty(false)
///     .build()
///     .unwrap();
/// let all = store.list().unwrap();
/// ```
#[derive(Debug)]
pub struct RecordStoreBuilder {
    path: PathBuf,
    pretty: bool,
}

impl RecordStoreBuilder {
    fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            pretty: true,
        }
    }

    /// Write two-space indented JSON (default: on).
    pub fn pretty(mut self, yes: bool) -> Self {
        self.pretty = yes;
        self
    }

    /// Create the store. The file itself is created lazily on first access.
    pub fn build(self) -> Result<RecordStore<FileStorage>> {
        if self.path.as_os_str().is_empty() {
            return Err(Error::Config("document path is empty".into()));
        }
        let serializer = if self.pretty {
            JsonSerializer::pretty()
        } else {
            JsonSerializer::new()
        };
        Ok(RecordStore::new(FileStorage::with_serializer(
            self.path, serializer,
        )))
    }
}
