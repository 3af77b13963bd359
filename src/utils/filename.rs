use chrono::{DateTime, FixedOffset};
use std::path::PathBuf;

use crate::models::MeasurementKind;
use crate::utils::constants::{DEFAULT_OUTPUT_DIR, SNAPSHOT_TIME_FORMAT};

/// Format an observation time as `YYYYMMDDHHmmss` in its own UTC offset
pub fn snapshot_stamp(observed_at: &DateTime<FixedOffset>) -> String {
    observed_at.format(SNAPSHOT_TIME_FORMAT).to_string()
}

/// Build the snapshot URL for an observation time: `{base}/map/{stamp}.json`
pub fn snapshot_url(base_url: &str, observed_at: &DateTime<FixedOffset>) -> String {
    format!(
        "{}/map/{}.json",
        base_url.trim_end_matches('/'),
        snapshot_stamp(observed_at)
    )
}

/// Generate default output filename with format: amedas-{kind}-{YYYYMMDDHHmmss}.json
pub fn generate_default_points_filename(
    kind: MeasurementKind,
    observed_at: Option<&DateTime<FixedOffset>>,
) -> PathBuf {
    let stamp = observed_at
        .map(snapshot_stamp)
        .unwrap_or_else(|| "unknown".to_string());

    let filename = format!("amedas-{}-{}.json", kind.key(), stamp);
    PathBuf::from(DEFAULT_OUTPUT_DIR).join(filename)
}
