//! Where raw AMeDAS payloads come from.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::config::AppConfig;
use crate::error::{ProcessingError, Result};
use crate::utils::filename::snapshot_url;

/// The three payloads one fetch cycle needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    LatestTime,
    StationTable,
    Snapshot,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::LatestTime => "latest-time endpoint",
            SourceKind::StationTable => "station table",
            SourceKind::Snapshot => "observation snapshot",
        };
        write!(f, "{}", name)
    }
}

/// Trait for anything that can hand back raw AMeDAS payload bodies.
#[async_trait]
pub trait AmedasSource: Send + Sync {
    /// Plain-text timestamp of the most recent snapshot.
    async fn latest_time(&self) -> Result<String>;

    /// JSON station table.
    async fn station_table(&self) -> Result<String>;

    /// JSON snapshot for one observation time.
    async fn snapshot(&self, observed_at: &DateTime<FixedOffset>) -> Result<String>;
}

/// JMA bosai endpoints over HTTPS.
pub struct HttpSource {
    client: Client,
    latest_time_url: String,
    station_table_url: String,
    data_base_url: String,
}

impl HttpSource {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            latest_time_url: config.latest_time_url.clone(),
            station_table_url: config.station_table_url.clone(),
            data_base_url: config.data_base_url.clone(),
        })
    }

    async fn get_text(&self, source: SourceKind, url: &str) -> Result<String> {
        debug!(url = %url, "Requesting");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProcessingError::SourceUnavailable {
                source_name: source.to_string(),
                message: format!("{} returned HTTP {}", url, status),
            });
        }

        let body = response.text().await?;
        debug!(url = %url, bytes = body.len(), "Received");
        Ok(body)
    }
}

#[async_trait]
impl AmedasSource for HttpSource {
    #[instrument(skip(self))]
    async fn latest_time(&self) -> Result<String> {
        self.get_text(SourceKind::LatestTime, &self.latest_time_url)
            .await
    }

    #[instrument(skip(self))]
    async fn station_table(&self) -> Result<String> {
        self.get_text(SourceKind::StationTable, &self.station_table_url)
            .await
    }

    #[instrument(skip(self, observed_at), fields(observed_at = %observed_at))]
    async fn snapshot(&self, observed_at: &DateTime<FixedOffset>) -> Result<String> {
        let url = snapshot_url(&self.data_base_url, observed_at);
        self.get_text(SourceKind::Snapshot, &url).await
    }
}
