//! The previous run's sample, persisted between invocations
//!
//! Rate conversion needs the raw values and timestamp of the previous run. They live
//! in one JSON file per configuration, named after a hash of the metric prefix and the
//! source identity so that distinct configurations never share a file while repeated
//! runs of the same configuration always find theirs.
//!
//! The file is read once at the start of a run and overwritten in full at the end. A
//! missing, unreadable, or corrupt file is treated as an empty snapshot; a corrupt one
//! is also removed. No locking is performed, so concurrent runs against the same file
//! race and the last writer wins.

mod cache_doc;

use crate::Result;
use crate::metrics::FlatMetrics;
use cache_doc::LoadResult;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

const LOG_TARGET: &str = "  snapshot";

const FILE_NAME_PREFIX: &str = "json-metrics";

/// Raw values and timestamp of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Seconds since the Unix epoch; 0 when there is no previous run.
    pub last_timestamp: i64,

    pub metrics: FlatMetrics,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    last_timestamp: i64,
    metrics: &'a FlatMetrics,
}

/// Stable identifier for the snapshot of a given prefix and source.
#[must_use]
pub fn cache_key(prefix: &str, source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prefix.as_bytes());
    hasher.update(source.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Location of a snapshot file.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// A store backed by an explicit file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store for a prefix and source, placed inside `work_dir`.
    #[must_use]
    pub fn for_source(work_dir: impl AsRef<Path>, prefix: &str, source: &str) -> Self {
        let file_name = format!("{FILE_NAME_PREFIX}.{}", cache_key(prefix, source));
        Self::new(work_dir.as_ref().join(file_name))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the previous snapshot.
    ///
    /// Never fails: anything other than a well-formed file yields an empty snapshot
    /// with a zero timestamp. A file that does not parse is deleted on a best-effort basis.
    #[must_use]
    pub fn load(&self) -> Snapshot {
        match cache_doc::load(&self.path, "snapshot") {
            LoadResult::Data(snapshot) => snapshot,
            LoadResult::Missing => Snapshot::default(),
            LoadResult::Unreadable(e) => {
                log::warn!(target: LOG_TARGET, "Couldn't fetch last values: {e:#}");
                Snapshot::default()
            }
            LoadResult::Corrupt(e) => {
                log::warn!(target: LOG_TARGET, "Discarding invalid snapshot: {e:#}");
                if let Err(e) = fs::remove_file(&self.path) {
                    log::debug!(target: LOG_TARGET, "Unable to remove '{}': {e}", self.path.display());
                }
                Snapshot::default()
            }
        }
    }

    /// Replace the stored snapshot with the given values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save(&self, last_timestamp: i64, metrics: &FlatMetrics) -> Result<()> {
        cache_doc::save(&SnapshotRef { last_timestamp, metrics }, &self.path)
    }
}
