use crate::config::{AppConfig, FailurePolicy};
use crate::error::Result;
use crate::models::StationRecord;
use crate::processors::{CoverageChecker, CoverageReport, DataMerger};
use crate::readers::{AmedasSource, ConcurrentReader};
use crate::utils::progress::{FetchStage, ProgressReporter};
use chrono::{DateTime, FixedOffset};
use std::time::Duration;
use tracing::{info, instrument};

/// Fetch, join and quality-check one AMeDAS snapshot
pub struct StationPipeline<S> {
    reader: ConcurrentReader<S>,
    merger: DataMerger,
}

impl<S: AmedasSource + 'static> StationPipeline<S> {
    pub fn new(source: S) -> Self {
        Self {
            reader: ConcurrentReader::new(source),
            merger: DataMerger::new(),
        }
    }

    pub fn from_config(source: S, config: &AppConfig) -> Self {
        Self::new(source)
            .with_timeout(config.request_timeout())
            .with_failure_policy(config.failure_policy)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.reader = self.reader.with_timeout(timeout);
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.reader = self.reader.with_failure_policy(policy);
        self
    }

    /// Produce one record per snapshot station that has table metadata
    #[instrument(skip(self, progress))]
    pub async fn fetch_stations(
        &self,
        as_of: Option<DateTime<FixedOffset>>,
        progress: Option<&ProgressReporter>,
    ) -> Result<(Vec<StationRecord>, CoverageReport)> {
        let data = self.reader.read_all_with_progress(as_of, progress).await?;

        if let Some(p) = progress {
            p.stage(FetchStage::Joining);
        }

        let joined = self.merger.merge(&data.stations, &data.snapshot);

        let report = CoverageChecker::new().check_coverage(
            &joined.records,
            data.observed_at,
            joined.unknown_codes,
            data.failures,
        );

        info!(
            records = joined.records.len(),
            unknown = report.unknown_codes.len(),
            "Station records ready"
        );

        Ok((joined.records, report))
    }
}
