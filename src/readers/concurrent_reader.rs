use crate::config::FailurePolicy;
use crate::error::{ProcessingError, Result};
use crate::models::{ObservationSnapshot, StationTable};
use crate::readers::snapshot_reader::parse_latest_time;
use crate::readers::source::{AmedasSource, SourceKind};
use crate::readers::{SnapshotReader, StationReader};
use crate::utils::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::utils::progress::{FetchStage, ProgressReporter};
use chrono::{DateTime, FixedOffset};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

/// A source that failed during a fetch cycle
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFailure {
    pub source: SourceKind,
    pub message: String,
}

/// Everything one fetch cycle retrieved
#[derive(Debug, Default)]
pub struct StationData {
    pub observed_at: Option<DateTime<FixedOffset>>,
    pub stations: StationTable,
    pub snapshot: ObservationSnapshot,
    pub failures: Vec<SourceFailure>,
}

pub struct ConcurrentReader<S> {
    source: Arc<S>,
    timeout: Duration,
    policy: FailurePolicy,
}

impl<S: AmedasSource + 'static> ConcurrentReader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            policy: FailurePolicy::Degrade,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Ask the source for the most recent observation time
    #[instrument(skip(self))]
    pub async fn resolve_latest_time(&self) -> Result<DateTime<FixedOffset>> {
        let body = bounded(self.timeout, SourceKind::LatestTime, self.source.latest_time()).await?;
        parse_latest_time(&body)
    }

    /// Run one fetch cycle
    ///
    /// The observation time is resolved first (unless `as_of` is given), then
    /// the station table and the snapshot are fetched concurrently. Each
    /// branch fails on its own; the failure policy decides whether a failed
    /// branch aborts the cycle or is recorded and replaced by an empty result.
    pub async fn read_all(&self, as_of: Option<DateTime<FixedOffset>>) -> Result<StationData> {
        self.read_all_with_progress(as_of, None).await
    }

    /// [`Self::read_all`], reporting each stage on `progress`
    #[instrument(skip(self, progress), fields(policy = ?self.policy))]
    pub async fn read_all_with_progress(
        &self,
        as_of: Option<DateTime<FixedOffset>>,
        progress: Option<&ProgressReporter>,
    ) -> Result<StationData> {
        let mut failures = Vec::new();

        let observed_at = match as_of {
            Some(t) => Some(t),
            None => {
                if let Some(p) = progress {
                    p.stage(FetchStage::ResolvingTime);
                }
                match self.resolve_latest_time().await {
                    Ok(t) => Some(t),
                    Err(e) => {
                        self.record_failure(SourceKind::LatestTime, e, &mut failures)?;
                        None
                    }
                }
            }
        };

        if let Some(p) = progress {
            p.stage(FetchStage::Downloading);
        }

        let timeout = self.timeout;

        let table_source = Arc::clone(&self.source);
        let table_handle: JoinHandle<Result<StationTable>> = tokio::spawn(async move {
            let body = bounded(timeout, SourceKind::StationTable, table_source.station_table()).await?;
            StationReader::new().parse_table(&body)
        });

        let snapshot_source = Arc::clone(&self.source);
        let snapshot_handle: JoinHandle<Result<ObservationSnapshot>> = tokio::spawn(async move {
            let observed_at = observed_at.ok_or_else(|| {
                ProcessingError::MissingData("observation time could not be resolved".to_string())
            })?;
            let body = bounded(
                timeout,
                SourceKind::Snapshot,
                snapshot_source.snapshot(&observed_at),
            )
            .await?;
            SnapshotReader::new().parse_snapshot(&body, Some(observed_at))
        });

        // Wait for both branches; neither cancels the other
        let (table_result, snapshot_result) = tokio::join!(table_handle, snapshot_handle);

        let stations = match table_result? {
            Ok(table) => table,
            Err(e) => {
                self.record_failure(SourceKind::StationTable, e, &mut failures)?;
                StationTable::new()
            }
        };

        let snapshot = match snapshot_result? {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.record_failure(SourceKind::Snapshot, e, &mut failures)?;
                ObservationSnapshot::new(observed_at)
            }
        };

        info!(
            observed_at = ?observed_at,
            stations = stations.len(),
            observations = snapshot.len(),
            failures = failures.len(),
            "Fetch cycle complete"
        );

        Ok(StationData {
            observed_at,
            stations,
            snapshot,
            failures,
        })
    }

    fn record_failure(
        &self,
        source: SourceKind,
        error: ProcessingError,
        failures: &mut Vec<SourceFailure>,
    ) -> Result<()> {
        match self.policy {
            FailurePolicy::Strict => Err(error),
            FailurePolicy::Degrade => {
                warn!(source = %source, error = %error, "Continuing without source");
                failures.push(SourceFailure {
                    source,
                    message: error.to_string(),
                });
                Ok(())
            }
        }
    }
}

/// Await `fut`, turning an overrun into a typed timeout
async fn bounded<T, F>(timeout: Duration, source: SourceKind, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(ProcessingError::Timeout {
            source_name: source.to_string(),
            timeout,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    const TIME: &str = "2024-01-15T12:30:00+09:00";
    const TABLE: &str = r#"{"A": {"kjName":"X","lat":[35,0],"lon":[135,30]}}"#;
    const SNAPSHOT: &str = r#"{"A": {"temp": [20.0, 0]}}"#;

    #[derive(Clone, Default)]
    struct FakeSource {
        latest_time: Option<&'static str>,
        table: Option<&'static str>,
        snapshot: Option<&'static str>,
        table_delay: Option<Duration>,
    }

    impl FakeSource {
        fn healthy() -> Self {
            Self {
                latest_time: Some(TIME),
                table: Some(TABLE),
                snapshot: Some(SNAPSHOT),
                table_delay: None,
            }
        }
    }

    fn unavailable(source: SourceKind) -> ProcessingError {
        ProcessingError::SourceUnavailable {
            source_name: source.to_string(),
            message: "HTTP 503".to_string(),
        }
    }

    #[async_trait]
    impl AmedasSource for FakeSource {
        async fn latest_time(&self) -> Result<String> {
            self.latest_time
                .map(str::to_string)
                .ok_or_else(|| unavailable(SourceKind::LatestTime))
        }

        async fn station_table(&self) -> Result<String> {
            if let Some(delay) = self.table_delay {
                tokio::time::sleep(delay).await;
            }
            self.table
                .map(str::to_string)
                .ok_or_else(|| unavailable(SourceKind::StationTable))
        }

        async fn snapshot(&self, observed_at: &DateTime<FixedOffset>) -> Result<String> {
            assert_eq!(observed_at.format("%Y%m%d%H%M%S").to_string(), "20240115123000");
            self.snapshot
                .map(str::to_string)
                .ok_or_else(|| unavailable(SourceKind::Snapshot))
        }
    }

    #[tokio::test]
    async fn test_healthy_cycle() {
        let data = ConcurrentReader::new(FakeSource::healthy())
            .read_all(None)
            .await
            .unwrap();

        assert_eq!(data.observed_at, Some(DateTime::parse_from_rfc3339(TIME).unwrap()));
        assert_eq!(data.stations.len(), 1);
        assert_eq!(data.snapshot.len(), 1);
        assert!(data.failures.is_empty());
    }

    #[tokio::test]
    async fn test_explicit_time_skips_latest_lookup() {
        let source = FakeSource {
            latest_time: None,
            ..FakeSource::healthy()
        };
        let as_of = DateTime::parse_from_rfc3339(TIME).unwrap();

        let data = ConcurrentReader::new(source)
            .read_all(Some(as_of))
            .await
            .unwrap();
        assert!(data.failures.is_empty());
        assert_eq!(data.snapshot.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_table_degrades() {
        let source = FakeSource {
            table: None,
            ..FakeSource::healthy()
        };

        let data = ConcurrentReader::new(source).read_all(None).await.unwrap();
        assert!(data.stations.is_empty());
        assert_eq!(data.snapshot.len(), 1);
        assert_eq!(data.failures.len(), 1);
        assert_eq!(data.failures[0].source, SourceKind::StationTable);
    }

    #[tokio::test]
    async fn test_unresolved_time_degrades_snapshot_only() {
        let source = FakeSource {
            latest_time: Some("not a time"),
            ..FakeSource::healthy()
        };

        let data = ConcurrentReader::new(source).read_all(None).await.unwrap();
        assert_eq!(data.observed_at, None);
        assert_eq!(data.stations.len(), 1);
        assert!(data.snapshot.is_empty());

        let failed: Vec<SourceKind> = data.failures.iter().map(|f| f.source).collect();
        assert_eq!(failed, vec![SourceKind::LatestTime, SourceKind::Snapshot]);
    }

    #[tokio::test]
    async fn test_strict_policy_surfaces_failure() {
        let source = FakeSource {
            snapshot: None,
            ..FakeSource::healthy()
        };

        let result = ConcurrentReader::new(source)
            .with_failure_policy(FailurePolicy::Strict)
            .read_all(None)
            .await;
        assert!(matches!(
            result,
            Err(ProcessingError::SourceUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_slow_branch_times_out() {
        let source = FakeSource {
            table_delay: Some(Duration::from_secs(5)),
            ..FakeSource::healthy()
        };

        let data = ConcurrentReader::new(source.clone())
            .with_timeout(Duration::from_millis(50))
            .read_all(None)
            .await
            .unwrap();
        assert!(data.stations.is_empty());
        assert_eq!(data.snapshot.len(), 1);
        assert!(data.failures[0].message.contains("did not respond"));

        let result = ConcurrentReader::new(source)
            .with_timeout(Duration::from_millis(50))
            .with_failure_policy(FailurePolicy::Strict)
            .read_all(None)
            .await;
        assert!(matches!(result, Err(ProcessingError::Timeout { .. })));
    }
}
