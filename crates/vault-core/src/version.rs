//! Version chains: the head version of each (owner, series)
//!
//! A chain is loaded from the store once and then tracks its head in
//! memory. Commits go through a per-chain lock held from reading the head
//! snapshot to writing the next one, so two scans of the same owner can
//! never both build on the same head.

use crate::error::Result;
use crate::owner::OwnerId;
use crate::record::RecordSet;
use crate::schema::Series;
use crate::store::SnapshotStore;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Head state of a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainHead {
    /// No snapshot written yet
    Empty,
    /// Latest snapshot version
    At(u32),
}

/// Result of a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Head version after the commit
    pub version: u32,
    /// Whether the commit wrote that version
    pub written: bool,
}

/// Version chain of one (owner, series)
#[derive(Debug)]
pub struct VersionChain {
    owner: OwnerId,
    series: Series,
    head: ChainHead,
}

impl VersionChain {
    /// Load the head from the store
    pub fn load<S: SnapshotStore + ?Sized>(
        store: &S,
        owner: &OwnerId,
        series: Series,
    ) -> Result<Self> {
        let head = match store.latest_version(owner, series)? {
            0 => ChainHead::Empty,
            v => ChainHead::At(v),
        };
        Ok(Self {
            owner: owner.clone(),
            series,
            head,
        })
    }

    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    pub fn series(&self) -> Series {
        self.series
    }

    pub fn head(&self) -> ChainHead {
        self.head
    }

    /// Head version, 0 for an empty chain
    pub fn current_version(&self) -> u32 {
        match self.head {
            ChainHead::Empty => 0,
            ChainHead::At(v) => v,
        }
    }

    /// Read the head snapshot, `None` for an empty chain
    pub fn current<S: SnapshotStore + ?Sized>(&self, store: &S) -> Result<Option<RecordSet>> {
        match self.head {
            ChainHead::Empty => Ok(None),
            ChainHead::At(v) => store.read(&self.owner, self.series, v).map(Some),
        }
    }

    /// Persist `merged` as the next version if needed.
    ///
    /// An empty chain always writes version 1. Otherwise a new version is
    /// written only when `changed` is set; if not, the head stays put and
    /// nothing touches the store. The head advances only after the write
    /// succeeded.
    pub fn commit<S: SnapshotStore + ?Sized>(
        &mut self,
        store: &S,
        merged: &RecordSet,
        changed: bool,
    ) -> Result<Commit> {
        let next = match self.head {
            ChainHead::Empty => 1,
            ChainHead::At(v) if changed => v + 1,
            ChainHead::At(v) => {
                info!(owner = %self.owner, series = %self.series, version = v, "no changes, keeping head");
                return Ok(Commit {
                    version: v,
                    written: false,
                });
            }
        };

        store.write(&self.owner, self.series, next, merged)?;
        self.head = ChainHead::At(next);
        info!(
            owner = %self.owner,
            series = %self.series,
            version = next,
            records = merged.len(),
            "wrote snapshot"
        );
        Ok(Commit {
            version: next,
            written: true,
        })
    }
}

/// Shared handle to a chain; lock it for the whole read-merge-commit cycle
pub type ChainHandle = Arc<Mutex<VersionChain>>;

/// Registry of loaded chains, one per (owner, series)
#[derive(Debug, Default)]
pub struct ChainRegistry {
    chains: Mutex<HashMap<(OwnerId, Series), ChainHandle>>,
}

impl ChainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the chain for (owner, series), loading it on first use
    pub fn handle<S: SnapshotStore + ?Sized>(
        &self,
        store: &S,
        owner: &OwnerId,
        series: Series,
    ) -> Result<ChainHandle> {
        let mut chains = self.chains.lock();
        let key = (owner.clone(), series);
        if let Some(handle) = chains.get(&key) {
            return Ok(Arc::clone(handle));
        }
        let handle = Arc::new(Mutex::new(VersionChain::load(store, owner, series)?));
        chains.insert(key, Arc::clone(&handle));
        Ok(handle)
    }

    /// Number of loaded chains
    pub fn loaded(&self) -> usize {
        self.chains.lock().len()
    }
}
