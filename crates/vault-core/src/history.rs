//! Per-owner scan log
//!
//! Records every scan that reached the store, whether or not it produced a
//! new snapshot, so an operator can see when a showcase was last checked.

use crate::error::{Error, Result};
use crate::reconcile::MergeStats;
use crate::schema::Series;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tempfile::NamedTempFile;

/// Outcome of one series within a logged scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesLogLine {
    pub series: Series,
    /// Head version after the scan
    pub version: u32,
    /// Whether the scan wrote that version
    pub written: bool,
    pub stats: MergeStats,
}

/// A record of one scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanLogEntry {
    /// When the scan was committed
    pub timestamp: DateTime<Utc>,
    /// Player nickname reported by the payload
    pub nickname: Option<String>,
    /// Per-series outcome, in commit order
    pub series: Vec<SeriesLogLine>,
}

impl ScanLogEntry {
    /// Whether any series got a new version
    pub fn wrote_anything(&self) -> bool {
        self.series.iter().any(|line| line.written)
    }
}

/// Log file holding all scans of one owner, oldest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanLog {
    pub entries: Vec<ScanLogEntry>,
}

impl ScanLog {
    /// Create a new empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the log from a file, or create empty if not exists
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(Error::Json)
    }

    /// Save the log to a file, replacing it atomically
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, self)?;
        tmp.persist(path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }

    /// Append an entry
    pub fn add_entry(&mut self, entry: ScanLogEntry) {
        self.entries.push(entry);
    }

    /// Most recent entry
    pub fn last_entry(&self) -> Option<&ScanLogEntry> {
        self.entries.last()
    }

    /// Number of logged scans
    pub fn total_entries(&self) -> usize {
        self.entries.len()
    }
}
