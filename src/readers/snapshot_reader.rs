use crate::error::{ProcessingError, Result};
use crate::models::{ObservationSnapshot, RawObservation};
use crate::readers::station_reader::json_type;
use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Parse the body of the latest-time endpoint, e.g. `2024-01-15T12:30:00+09:00`
pub fn parse_latest_time(body: &str) -> Result<DateTime<FixedOffset>> {
    let trimmed = body.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .or_else(|_| DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%z"))
        .map_err(ProcessingError::from)
}

pub struct SnapshotReader;

impl SnapshotReader {
    pub fn new() -> Self {
        Self
    }

    /// Parse an observation snapshot, keeping the payload's key order
    ///
    /// A station whose readings cannot be decoded is logged and left out;
    /// the rest of the snapshot is still usable.
    pub fn parse_snapshot(
        &self,
        json: &str,
        observed_at: Option<DateTime<FixedOffset>>,
    ) -> Result<ObservationSnapshot> {
        let root: Map<String, Value> = match serde_json::from_str(json)? {
            Value::Object(map) => map,
            other => {
                return Err(ProcessingError::InvalidFormat(format!(
                    "Snapshot must be a JSON object, got {}",
                    json_type(&other)
                )))
            }
        };

        let mut snapshot = ObservationSnapshot::new(observed_at);
        snapshot.entries.reserve(root.len());

        for (code, value) in root {
            match serde_json::from_value::<RawObservation>(value) {
                Ok(observation) => snapshot.push(code, observation),
                Err(e) => warn!(code = %code, error = %e, "Skipping undecodable observation"),
            }
        }

        debug!(stations = snapshot.len(), "Parsed observation snapshot");
        Ok(snapshot)
    }
}

impl Default for SnapshotReader {
    fn default() -> Self {
        Self::new()
    }
}
