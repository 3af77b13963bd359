//! Runtime settings, layered from an optional TOML file and `AMEDAS__*`
//! environment variables.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::catalog::{Catalog, RangeOverride};
use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_DATA_BASE_URL, DEFAULT_LATEST_TIME_URL, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_STATION_TABLE_URL, DEFAULT_USER_AGENT,
};

/// What to do when one branch of a fetch cycle fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log the failure, record it in the report and continue without that source
    #[default]
    Degrade,
    /// Return the first failure to the caller
    Strict,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_latest_time_url")]
    pub latest_time_url: String,

    #[serde(default = "default_station_table_url")]
    pub station_table_url: String,

    /// Snapshots live under `{data_base_url}/map/`
    #[serde(default = "default_data_base_url")]
    pub data_base_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Per-kind range overrides keyed by measurement key (`temp`, `wind`, ...)
    #[serde(default)]
    pub ranges: HashMap<String, RangeOverride>,
}

fn default_latest_time_url() -> String {
    DEFAULT_LATEST_TIME_URL.to_string()
}

fn default_station_table_url() -> String {
    DEFAULT_STATION_TABLE_URL.to_string()
}

fn default_data_base_url() -> String {
    DEFAULT_DATA_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            latest_time_url: default_latest_time_url(),
            station_table_url: default_station_table_url(),
            data_base_url: default_data_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
            failure_policy: FailurePolicy::default(),
            ranges: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Load settings; a missing file is not an error
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        let settings = builder
            .add_source(
                ::config::Environment::with_prefix("AMEDAS")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let app_config: AppConfig = settings.try_deserialize()?;
        app_config.catalog()?;
        Ok(app_config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Default catalog with configured range overrides applied and validated
    pub fn catalog(&self) -> Result<Catalog> {
        Catalog::amedas_default().with_overrides(&self.ranges)
    }
}
