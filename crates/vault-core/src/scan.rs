//! Scan orchestration: one payload in, three committed series out

use crate::combined::combine;
use crate::config::VaultConfig;
use crate::error::{Error, Result};
use crate::history::{ScanLogEntry, SeriesLogLine};
use crate::owner::OwnerId;
use crate::payload::Showcase;
use crate::reconcile::{reconcile, MergeStats, Reconciliation};
use crate::record::{Record, RecordSet};
use crate::schema::Series;
use crate::store::{FsStore, SnapshotStore};
use crate::version::{ChainRegistry, VersionChain};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

/// Outcome of one series within a scan
#[derive(Debug, Clone, Serialize)]
pub struct SeriesOutcome {
    pub series: Series,
    pub stats: MergeStats,
    /// Head version after the scan
    pub version: u32,
    /// Whether this scan wrote `version`
    pub written: bool,
    /// Full merged record set at `version`
    pub records: RecordSet,
}

/// Result of one scan, handed to reporting and API collaborators
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    pub owner: OwnerId,
    pub nickname: Option<String>,
    pub scanned_at: DateTime<Utc>,
    /// Payload entries (avatars, artifacts) that could not be read
    pub skipped: usize,
    pub characters: SeriesOutcome,
    pub artifacts: SeriesOutcome,
    pub combined: SeriesOutcome,
}

impl ScanSummary {
    /// Outcomes in commit order
    pub fn outcomes(&self) -> [&SeriesOutcome; 3] {
        [&self.characters, &self.artifacts, &self.combined]
    }

    /// Whether any series got a new version
    pub fn changed(&self) -> bool {
        self.outcomes().iter().any(|o| o.written)
    }

    fn log_entry(&self) -> ScanLogEntry {
        ScanLogEntry {
            timestamp: self.scanned_at,
            nickname: self.nickname.clone(),
            series: self
                .outcomes()
                .iter()
                .map(|o| SeriesLogLine {
                    series: o.series,
                    version: o.version,
                    written: o.written,
                    stats: o.stats,
                })
                .collect(),
        }
    }
}

/// Reconciliation engine over a snapshot store
#[derive(Debug)]
pub struct Vault<S> {
    store: S,
    chains: ChainRegistry,
}

impl Vault<FsStore> {
    /// Open the filesystem store named by the config
    pub fn open(config: &VaultConfig) -> Self {
        Self::new(FsStore::new(&config.data_dir))
    }
}

impl<S: SnapshotStore> Vault<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            chains: ChainRegistry::new(),
        }
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reconcile one scrape payload for `owner` and commit every series.
    ///
    /// The owner is validated and the payload extracted before the store is
    /// touched. The three chains of the owner stay locked for the whole
    /// scan, always in `Series::ALL` order, including the raw payload write
    /// and the scan log append. The raw payload is stored before any commit,
    /// so a scan that fails there changes no version. A failing commit
    /// aborts the scan and leaves every earlier version untouched.
    pub fn scan(&self, owner: &str, payload: &serde_json::Value) -> Result<ScanSummary> {
        let owner = OwnerId::parse(owner)?;
        let showcase = Showcase::from_payload(&owner, payload)?;
        if showcase.characters.is_empty() {
            return Err(Error::EmptyShowcase(owner.to_string()));
        }
        info!(
            %owner,
            characters = showcase.characters.len(),
            artifacts = showcase.artifacts.len(),
            skipped = showcase.skipped,
            "scanning showcase"
        );

        let characters_handle = self.chains.handle(&self.store, &owner, Series::Characters)?;
        let artifacts_handle = self.chains.handle(&self.store, &owner, Series::Artifacts)?;
        let combined_handle = self.chains.handle(&self.store, &owner, Series::Combined)?;
        let mut characters_chain = characters_handle.lock();
        let mut artifacts_chain = artifacts_handle.lock();
        let mut combined_chain = combined_handle.lock();

        self.store.write_raw(&owner, payload)?;

        let characters =
            self.commit_series(&mut characters_chain, showcase.character_records(), false)?;
        let artifacts =
            self.commit_series(&mut artifacts_chain, showcase.artifact_records(), false)?;

        // The combined view follows its sources even when the projection
        // itself comes out identical.
        let upstream_changed = characters.stats.has_changes() || artifacts.stats.has_changes();
        let combined_rows = combine(&characters.records, &artifacts.records);
        let combined = self.commit_series(&mut combined_chain, combined_rows, upstream_changed)?;

        let summary = ScanSummary {
            owner,
            nickname: showcase.player.nickname,
            scanned_at: Utc::now(),
            skipped: showcase.skipped,
            characters,
            artifacts,
            combined,
        };
        if let Err(e) = self.store.append_log(&summary.owner, &summary.log_entry()) {
            warn!(owner = %summary.owner, error = %e, "failed to append scan log");
        }

        drop(combined_chain);
        drop(artifacts_chain);
        drop(characters_chain);
        Ok(summary)
    }

    fn commit_series(
        &self,
        chain: &mut VersionChain,
        incoming: Vec<Record>,
        upstream_changed: bool,
    ) -> Result<SeriesOutcome> {
        let series = chain.series();
        let existing = chain.current(&self.store)?;
        let Reconciliation { merged, stats } = reconcile(existing.as_ref(), incoming, series);
        let commit = chain.commit(&self.store, &merged, stats.has_changes() || upstream_changed)?;
        info!(
            owner = %chain.owner(),
            %series,
            added = stats.added,
            updated = stats.updated,
            unchanged = stats.unchanged,
            skipped = stats.skipped,
            superseded = stats.superseded,
            version = commit.version,
            written = commit.written,
            "series reconciled"
        );
        Ok(SeriesOutcome {
            series,
            stats,
            version: commit.version,
            written: commit.written,
            records: merged,
        })
    }

    /// Stored versions of one series
    pub fn versions(&self, owner: &str, series: Series) -> Result<Vec<u32>> {
        let owner = OwnerId::parse(owner)?;
        self.store.versions(&owner, series)
    }

    /// A stored snapshot; the latest one when `version` is `None`.
    ///
    /// Returns `None` when the series has no snapshot yet.
    pub fn snapshot(
        &self,
        owner: &str,
        series: Series,
        version: Option<u32>,
    ) -> Result<Option<(u32, RecordSet)>> {
        let owner = OwnerId::parse(owner)?;
        let version = match version {
            Some(v) => v,
            None => match self.store.latest_version(&owner, series)? {
                0 => return Ok(None),
                v => v,
            },
        };
        let records = self.store.read(&owner, series, version)?;
        Ok(Some((version, records)))
    }

    /// Logged scans of an owner, oldest first
    pub fn history(&self, owner: &str) -> Result<Vec<ScanLogEntry>> {
        let owner = OwnerId::parse(owner)?;
        self.store.scan_log(&owner)
    }
}
