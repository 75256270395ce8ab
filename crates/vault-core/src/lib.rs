//! vault-core: Reconciliation and versioning engine for game showcase scrapes
//!
//! This library provides functionality to:
//! - Extract character and artifact records from showcase payloads
//! - Reconcile each scrape against the latest stored snapshot by identity and content keys
//! - Commit immutable, monotonically versioned snapshots per owner and series
//! - Project characters and artifacts into a combined per-character view
//! - Keep the latest raw payload and a scan log per owner

pub mod catalog;
pub mod combined;
pub mod config;
pub mod error;
pub mod history;
pub mod keys;
pub mod owner;
pub mod payload;
pub mod reconcile;
pub mod record;
pub mod scan;
pub mod schema;
pub mod store;
pub mod value;
pub mod version;

#[cfg(test)]
mod fixtures;

pub use combined::combine;
pub use config::VaultConfig;
pub use error::{Error, Result};
pub use history::{ScanLog, ScanLogEntry, SeriesLogLine};
pub use keys::{content_key, identity_key};
pub use owner::OwnerId;
pub use payload::{PlayerInfo, Showcase};
pub use reconcile::{reconcile, MergeStats, Reconciliation};
pub use record::{ArtifactRecord, CharacterRecord, Record, RecordSet, Substat};
pub use scan::{ScanSummary, SeriesOutcome, Vault};
pub use schema::{Schema, Series};
pub use store::{FsStore, MemoryStore, SnapshotStore};
pub use value::Value;
pub use version::{ChainHead, ChainRegistry, Commit, VersionChain};
