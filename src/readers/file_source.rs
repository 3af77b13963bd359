use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use std::path::{Path, PathBuf};

use crate::error::{ProcessingError, Result};
use crate::readers::source::{AmedasSource, SourceKind};
use crate::utils::filename::snapshot_stamp;

pub const LATEST_TIME_FILE: &str = "latest_time.txt";
pub const STATION_TABLE_FILE: &str = "amedastable.json";
pub const SNAPSHOT_DIR: &str = "map";

/// Payloads saved on disk in the same layout as the JMA site:
///
/// ```text
/// {root}/latest_time.txt
/// {root}/amedastable.json
/// {root}/map/{YYYYMMDDHHmmss}.json
/// ```
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn snapshot_path(&self, observed_at: &DateTime<FixedOffset>) -> PathBuf {
        self.root
            .join(SNAPSHOT_DIR)
            .join(format!("{}.json", snapshot_stamp(observed_at)))
    }

    async fn read(&self, source: SourceKind, path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ProcessingError::SourceUnavailable {
                source_name: source.to_string(),
                message: format!("{}: {}", path.display(), e),
            })
    }
}

#[async_trait]
impl AmedasSource for FileSource {
    async fn latest_time(&self) -> Result<String> {
        self.read(SourceKind::LatestTime, &self.root.join(LATEST_TIME_FILE))
            .await
    }

    async fn station_table(&self) -> Result<String> {
        self.read(SourceKind::StationTable, &self.root.join(STATION_TABLE_FILE))
            .await
    }

    async fn snapshot(&self, observed_at: &DateTime<FixedOffset>) -> Result<String> {
        self.read(SourceKind::Snapshot, &self.snapshot_path(observed_at))
            .await
    }
}
