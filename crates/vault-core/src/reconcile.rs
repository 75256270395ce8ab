//! Reconciliation of an incoming batch against the current snapshot

use crate::keys::{content_key, identity_key};
use crate::record::{Record, RecordSet};
use crate::schema::Series;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Per-batch classification counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    /// Records whose identity was not present before
    pub added: usize,
    /// Records that replaced an existing record with the same identity
    pub updated: usize,
    /// Records identical to one already stored
    pub unchanged: usize,
    /// Malformed records that were dropped
    pub skipped: usize,
    /// Records replaced by a later record with the same identity in the batch
    #[serde(default)]
    pub superseded: usize,
}

impl MergeStats {
    /// Whether the batch changed anything
    pub fn has_changes(&self) -> bool {
        self.added > 0 || self.updated > 0
    }
}

/// Result of reconciling one batch
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// Full merged record set (existing plus applied changes)
    pub merged: RecordSet,
    /// Classification counters
    pub stats: MergeStats,
}

/// Merge `incoming` into `existing`.
///
/// Records that fail validation are skipped and counted. The batch is then
/// collapsed to one record per identity: the later of two records sharing
/// an identity wins and the earlier one is counted as superseded. Each
/// survivor is classified against the stored set only, as unchanged (same
/// content key as a stored record), updated (same identity key, different
/// content; replaces the stored record in place) or added (new identity;
/// appended). Stored records missing from the batch are kept.
///
/// The existing set is never mutated; the merged set is a new collection.
pub fn reconcile(
    existing: Option<&RecordSet>,
    incoming: Vec<Record>,
    series: Series,
) -> Reconciliation {
    let mut stats = MergeStats::default();
    let mut records: Vec<Record> = existing.map(|s| s.records.clone()).unwrap_or_default();

    let mut by_identity: HashMap<String, usize> = HashMap::with_capacity(records.len());
    let mut stored_content: HashSet<String> = HashSet::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        by_identity.insert(identity_key(record, series), idx);
        stored_content.insert(content_key(record, series));
    }

    let mut batch: Vec<(String, Record)> = Vec::with_capacity(incoming.len());
    let mut batch_slots: HashMap<String, usize> = HashMap::with_capacity(incoming.len());
    for record in incoming {
        if let Err(err) = record.validate(series) {
            warn!(%series, error = %err, "skipping malformed record");
            stats.skipped += 1;
            continue;
        }
        let identity = identity_key(&record, series);
        match batch_slots.get(&identity) {
            Some(&slot) => {
                debug!(%series, key = %identity, "superseded within batch");
                batch[slot].1 = record;
                stats.superseded += 1;
            }
            None => {
                batch_slots.insert(identity.clone(), batch.len());
                batch.push((identity, record));
            }
        }
    }

    for (identity, record) in batch {
        let content = content_key(&record, series);
        if stored_content.contains(&content) {
            debug!(%series, key = %content, "unchanged");
            stats.unchanged += 1;
            continue;
        }

        match by_identity.get(&identity) {
            Some(&idx) => {
                debug!(%series, key = %identity, "updated");
                records[idx] = record;
                stats.updated += 1;
            }
            None => {
                debug!(%series, key = %identity, "added");
                records.push(record);
                stats.added += 1;
            }
        }
    }

    Reconciliation {
        merged: RecordSet::from_records(series, records),
        stats,
    }
}
