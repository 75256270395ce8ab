//! Snapshot storage backends: CSV files on disk, in-memory for tests and embedding.

pub mod fs;
pub mod memory;

pub use self::fs::FsStore;
pub use self::memory::MemoryStore;

use crate::error::Result;
use crate::history::ScanLogEntry;
use crate::owner::OwnerId;
use crate::record::RecordSet;
use crate::schema::Series;

/// Snapshot store: versioned, immutable record sets per (owner, series).
///
/// `write` must refuse a version that already exists with
/// `Error::StorageConflict` and leave the stored snapshot untouched.
pub trait SnapshotStore: Send + Sync {
    /// Read one snapshot. Missing versions yield `Error::SnapshotNotFound`.
    fn read(&self, owner: &OwnerId, series: Series, version: u32) -> Result<RecordSet>;

    /// Write a new snapshot under a version that does not exist yet.
    fn write(&self, owner: &OwnerId, series: Series, version: u32, records: &RecordSet)
        -> Result<()>;

    /// All stored versions, ascending.
    fn versions(&self, owner: &OwnerId, series: Series) -> Result<Vec<u32>>;

    /// Highest stored version, 0 if none.
    fn latest_version(&self, owner: &OwnerId, series: Series) -> Result<u32> {
        Ok(self.versions(owner, series)?.last().copied().unwrap_or(0))
    }

    /// Replace the owner's latest raw payload.
    fn write_raw(&self, owner: &OwnerId, payload: &serde_json::Value) -> Result<()>;

    /// Latest raw payload, if one was stored.
    fn read_raw(&self, owner: &OwnerId) -> Result<Option<serde_json::Value>>;

    /// Append to the owner's scan log.
    fn append_log(&self, owner: &OwnerId, entry: &ScanLogEntry) -> Result<()>;

    /// Every logged scan of the owner, oldest first.
    fn scan_log(&self, owner: &OwnerId) -> Result<Vec<ScanLogEntry>>;
}
