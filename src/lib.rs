//! Candidate records kept in a single JSON document, behind a small HTTP API.
//!
//! Every operation reads the whole document, changes it in memory and writes
//! it back atomically. The document is either a bare array of records or an
//! object holding them under `candidatos`; whichever it was on load is what
//! gets written.
//!
//! ```rust,no_run
//! use candidate_store::{Record, RecordStore};
//!
//! let store = RecordStore::open("data/base_del_proto.json").unwrap();
//! let created = store.create(Record::default()).unwrap();
//! store.recompute_classification().unwrap();
//! store.delete_by_id(created.id().unwrap()).unwrap();
//! ```
//!
//! **Single-process only.** The store serializes its own operations, but two
//! processes pointed at the same file will clobber each other.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod classify;
pub mod config;
pub mod document;
pub mod error;
pub mod http;
pub mod persist;
pub mod record;
pub mod serializer;
pub mod store;
pub mod views;

pub use backend::{FileStorage, MemoryStorage, Storage};
pub use classify::Classification;
pub use config::Config;
pub use document::{Document, Shape};
pub use error::{Error, Result};
pub use record::{Field, Record, PENDING_PREDICTION};
pub use store::{RecordStore, RecordStoreBuilder};
