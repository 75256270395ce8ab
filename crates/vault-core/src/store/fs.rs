//! Filesystem snapshot store
//!
//! Layout under the root directory:
//!
//! ```text
//! <root>/<owner>/characters_v1.csv
//! <root>/<owner>/artifacts_v1.csv
//! <root>/<owner>/combined_v1.csv
//! <root>/<owner>/raw.json
//! <root>/<owner>/history.json
//! ```

use super::SnapshotStore;
use crate::error::{Error, Result};
use crate::history::{ScanLog, ScanLogEntry};
use crate::owner::OwnerId;
use crate::record::{Record, RecordSet};
use crate::schema::Series;
use crate::value::Value;
use std::fs::{self, File};
use std::io::{BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};
use walkdir::WalkDir;

const RAW_FILE: &str = "raw.json";
const LOG_FILE: &str = "history.json";

/// Snapshot store backed by CSV files
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `root` (created lazily on first write)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding all files of one owner
    pub fn owner_dir(&self, owner: &OwnerId) -> PathBuf {
        self.root.join(owner.as_str())
    }

    /// Path of one snapshot file
    pub fn snapshot_path(&self, owner: &OwnerId, series: Series, version: u32) -> PathBuf {
        self.owner_dir(owner)
            .join(format!("{}_v{}.csv", series.name(), version))
    }
}

impl SnapshotStore for FsStore {
    fn read(&self, owner: &OwnerId, series: Series, version: u32) -> Result<RecordSet> {
        let path = self.snapshot_path(owner, series, version);
        debug!(path = %path.display(), "reading snapshot");
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::SnapshotNotFound {
                    owner: owner.to_string(),
                    series,
                    version,
                })
            }
            Err(e) => return Err(Error::FileRead { path, source: e }),
        };
        read_snapshot(BufReader::new(file), &path, series)
    }

    fn write(
        &self,
        owner: &OwnerId,
        series: Series,
        version: u32,
        records: &RecordSet,
    ) -> Result<()> {
        let conflict = || Error::StorageConflict {
            owner: owner.to_string(),
            series,
            version,
        };

        let dir = self.owner_dir(owner);
        fs::create_dir_all(&dir)?;

        let path = self.snapshot_path(owner, series, version);
        if path.exists() {
            return Err(conflict());
        }

        // Write aside, then move into place without replacing: a stored
        // version is never overwritten or left half-written.
        let mut tmp = NamedTempFile::new_in(&dir)?;
        write_snapshot(&mut tmp, &path, series, records)?;
        tmp.as_file().sync_all()?;
        match tmp.persist_noclobber(&path) {
            Ok(_) => Ok(()),
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Err(conflict()),
            Err(e) => Err(Error::Io(e.error)),
        }
    }

    fn versions(&self, owner: &OwnerId, series: Series) -> Result<Vec<u32>> {
        let dir = self.owner_dir(owner);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut versions = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(version) = entry
                .file_name()
                .to_str()
                .and_then(|name| parse_version(name, series))
            {
                versions.push(version);
            }
        }
        versions.sort_unstable();
        Ok(versions)
    }

    fn write_raw(&self, owner: &OwnerId, payload: &serde_json::Value) -> Result<()> {
        let dir = self.owner_dir(owner);
        fs::create_dir_all(&dir)?;
        let mut tmp = NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut tmp, payload)?;
        tmp.persist(dir.join(RAW_FILE)).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }

    fn read_raw(&self, owner: &OwnerId) -> Result<Option<serde_json::Value>> {
        let path = self.owner_dir(owner).join(RAW_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(|e| Error::FileRead {
            path: path.clone(),
            source: e,
        })?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn append_log(&self, owner: &OwnerId, entry: &ScanLogEntry) -> Result<()> {
        let dir = self.owner_dir(owner);
        fs::create_dir_all(&dir)?;
        let path = dir.join(LOG_FILE);
        let mut log = ScanLog::load(&path)?;
        log.add_entry(entry.clone());
        log.save(&path)
    }

    fn scan_log(&self, owner: &OwnerId) -> Result<Vec<ScanLogEntry>> {
        Ok(ScanLog::load(self.owner_dir(owner).join(LOG_FILE))?.entries)
    }
}

/// Extract the version from `<series>_v<N>.csv`
fn parse_version(file_name: &str, series: Series) -> Option<u32> {
    let digits = file_name
        .strip_prefix(series.name())?
        .strip_prefix("_v")?
        .strip_suffix(".csv")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|v| *v > 0)
}

fn write_snapshot<W: Write>(out: W, path: &Path, series: Series, records: &RecordSet) -> Result<()> {
    let csv_err = |e: csv::Error| Error::Csv {
        path: path.to_path_buf(),
        source: e,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);

    writer
        .write_record(series.schema().columns)
        .map_err(csv_err)?;
    for record in records.iter() {
        writer
            .write_record(record.values().iter().map(Value::to_string_value))
            .map_err(csv_err)?;
    }
    writer.flush()?;
    Ok(())
}

fn read_snapshot<R: std::io::Read>(reader: R, path: &Path, series: Series) -> Result<RecordSet> {
    let schema = series.schema();
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // Allow varying number of fields
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(|e| Error::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;
    if !headers.iter().eq(schema.columns.iter().copied()) {
        return Err(Error::SchemaMismatch {
            path: path.to_path_buf(),
            expected: schema.columns.join(","),
            found: headers.iter().collect::<Vec<_>>().join(","),
        });
    }

    let mut records = Vec::new();
    for (row_idx, result) in csv_reader.records().enumerate() {
        let row = result.map_err(|e| Error::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut values: Vec<Value> = row.iter().map(Value::parse).collect();
        if values.len() != schema.width() {
            warn!(
                path = %path.display(),
                row = row_idx + 1,
                found = values.len(),
                expected = schema.width(),
                "snapshot row has wrong field count, padding/truncating"
            );
            values.resize(schema.width(), Value::Empty);
        }
        records.push(Record::new(values));
    }

    Ok(RecordSet::from_records(series, records))
}
