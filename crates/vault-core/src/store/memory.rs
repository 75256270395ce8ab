//! In-memory snapshot store

use super::SnapshotStore;
use crate::error::{Error, Result};
use crate::history::ScanLogEntry;
use crate::owner::OwnerId;
use crate::record::RecordSet;
use crate::schema::Series;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

type SnapshotKey = (OwnerId, Series, u32);

/// Snapshot store that keeps everything in process memory.
///
/// Counts every call made against it, which lets callers assert that a
/// rejected request never reached storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshots: Mutex<BTreeMap<SnapshotKey, RecordSet>>,
    raw: Mutex<HashMap<OwnerId, serde_json::Value>>,
    logs: Mutex<HashMap<OwnerId, Vec<ScanLogEntry>>>,
    calls: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations performed so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, owner: &OwnerId, series: Series, version: u32) -> Result<RecordSet> {
        self.touch();
        self.snapshots
            .lock()
            .get(&(owner.clone(), series, version))
            .cloned()
            .ok_or_else(|| Error::SnapshotNotFound {
                owner: owner.to_string(),
                series,
                version,
            })
    }

    fn write(
        &self,
        owner: &OwnerId,
        series: Series,
        version: u32,
        records: &RecordSet,
    ) -> Result<()> {
        self.touch();
        let mut snapshots = self.snapshots.lock();
        let key = (owner.clone(), series, version);
        if snapshots.contains_key(&key) {
            return Err(Error::StorageConflict {
                owner: owner.to_string(),
                series,
                version,
            });
        }
        snapshots.insert(key, records.clone());
        Ok(())
    }

    fn versions(&self, owner: &OwnerId, series: Series) -> Result<Vec<u32>> {
        self.touch();
        Ok(self
            .snapshots
            .lock()
            .keys()
            .filter(|(o, s, _)| o == owner && *s == series)
            .map(|(_, _, v)| *v)
            .collect())
    }

    fn write_raw(&self, owner: &OwnerId, payload: &serde_json::Value) -> Result<()> {
        self.touch();
        self.raw.lock().insert(owner.clone(), payload.clone());
        Ok(())
    }

    fn read_raw(&self, owner: &OwnerId) -> Result<Option<serde_json::Value>> {
        self.touch();
        Ok(self.raw.lock().get(owner).cloned())
    }

    fn append_log(&self, owner: &OwnerId, entry: &ScanLogEntry) -> Result<()> {
        self.touch();
        self.logs
            .lock()
            .entry(owner.clone())
            .or_default()
            .push(entry.clone());
        Ok(())
    }

    fn scan_log(&self, owner: &OwnerId) -> Result<Vec<ScanLogEntry>> {
        self.touch();
        Ok(self.logs.lock().get(owner).cloned().unwrap_or_default())
    }
}
