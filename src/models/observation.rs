use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::models::{MeasurementKind, Wind};
use crate::utils::constants::QUALITY_NORMAL;

/// Validity of a single reading as reported by the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityFlag {
    Normal,
    Flagged(i64),
    Absent,
}

impl QualityFlag {
    pub fn from_raw(flag: Option<i64>) -> Self {
        match flag {
            Some(QUALITY_NORMAL) => QualityFlag::Normal,
            Some(other) => QualityFlag::Flagged(other),
            None => QualityFlag::Absent,
        }
    }

    pub fn is_usable(&self) -> bool {
        matches!(self, QualityFlag::Normal)
    }
}

/// One `[value, qualityFlag]` pair from the snapshot payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawReading(pub Option<f64>, pub Option<i64>);

impl RawReading {
    pub fn new(value: f64, flag: i64) -> Self {
        Self(Some(value), Some(flag))
    }

    pub fn value(&self) -> Option<f64> {
        self.0
    }

    pub fn quality(&self) -> QualityFlag {
        QualityFlag::from_raw(self.1)
    }

    /// The value, only if the reading passed the quality check
    pub fn accepted(&self) -> Option<f64> {
        if self.quality().is_usable() {
            self.0
        } else {
            None
        }
    }
}

/// Decode one `[value, qualityFlag]` entry, turning a malformed entry into
/// "no data" instead of failing the whole station
fn lenient_reading<'de, D>(deserializer: D) -> Result<Option<RawReading>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match serde_json::from_value::<RawReading>(value) {
        Ok(reading) => Some(reading),
        Err(e) => {
            warn!(error = %e, "Dropping malformed reading");
            None
        }
    }))
}

/// Raw readings for one station in one snapshot
///
/// Keys the pipeline does not use (pressure, visibility, ...) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    #[serde(rename = "precipitation10m", default, deserialize_with = "lenient_reading")]
    pub precipitation_10m: Option<RawReading>,
    #[serde(rename = "precipitation1h", default, deserialize_with = "lenient_reading")]
    pub precipitation_1h: Option<RawReading>,
    #[serde(rename = "precipitation3h", default, deserialize_with = "lenient_reading")]
    pub precipitation_3h: Option<RawReading>,
    #[serde(rename = "precipitation24h", default, deserialize_with = "lenient_reading")]
    pub precipitation_24h: Option<RawReading>,
    #[serde(rename = "wind", default, deserialize_with = "lenient_reading")]
    pub wind_speed: Option<RawReading>,
    #[serde(rename = "windDirection", default, deserialize_with = "lenient_reading")]
    pub wind_direction: Option<RawReading>,
    #[serde(rename = "temp", default, deserialize_with = "lenient_reading")]
    pub temperature: Option<RawReading>,
    #[serde(rename = "sun1h", default, deserialize_with = "lenient_reading")]
    pub sunshine_1h: Option<RawReading>,
    #[serde(rename = "snow", default, deserialize_with = "lenient_reading")]
    pub snow_depth: Option<RawReading>,
    #[serde(rename = "snow6h", default, deserialize_with = "lenient_reading")]
    pub snowfall_6h: Option<RawReading>,
    #[serde(rename = "snow12h", default, deserialize_with = "lenient_reading")]
    pub snowfall_12h: Option<RawReading>,
    #[serde(rename = "snow24h", default, deserialize_with = "lenient_reading")]
    pub snowfall_24h: Option<RawReading>,
    #[serde(rename = "humidity", default, deserialize_with = "lenient_reading")]
    pub humidity: Option<RawReading>,
}

impl RawObservation {
    /// Raw entry for a scalar kind; wind resolves to its speed entry
    pub fn reading(&self, kind: MeasurementKind) -> Option<&RawReading> {
        match kind {
            MeasurementKind::Precipitation10m => self.precipitation_10m.as_ref(),
            MeasurementKind::Precipitation1h => self.precipitation_1h.as_ref(),
            MeasurementKind::Precipitation3h => self.precipitation_3h.as_ref(),
            MeasurementKind::Precipitation24h => self.precipitation_24h.as_ref(),
            MeasurementKind::Wind => self.wind_speed.as_ref(),
            MeasurementKind::Temperature => self.temperature.as_ref(),
            MeasurementKind::Sunshine1h => self.sunshine_1h.as_ref(),
            MeasurementKind::SnowDepth => self.snow_depth.as_ref(),
            MeasurementKind::Snowfall6h => self.snowfall_6h.as_ref(),
            MeasurementKind::Snowfall12h => self.snowfall_12h.as_ref(),
            MeasurementKind::Snowfall24h => self.snowfall_24h.as_ref(),
            MeasurementKind::Humidity => self.humidity.as_ref(),
        }
    }

    /// Quality-gated scalar value
    pub fn scalar(&self, kind: MeasurementKind) -> Option<f64> {
        self.reading(kind).and_then(RawReading::accepted)
    }

    /// Quality-gated wind: both speed and direction must pass, or neither is used
    pub fn wind(&self) -> Option<Wind> {
        let speed = self.wind_speed.as_ref().and_then(RawReading::accepted)?;
        let code = self.wind_direction.as_ref().and_then(RawReading::accepted)?;
        Some(Wind::from_compass(speed, code))
    }
}

/// All stations' raw readings for one observation time, in payload order
#[derive(Debug, Clone, Default)]
pub struct ObservationSnapshot {
    pub observed_at: Option<DateTime<FixedOffset>>,
    pub entries: Vec<(String, RawObservation)>,
}

impl ObservationSnapshot {
    pub fn new(observed_at: Option<DateTime<FixedOffset>>) -> Self {
        Self {
            observed_at,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, code: impl Into<String>, observation: RawObservation) {
        self.entries.push((code.into(), observation));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawObservation)> {
        self.entries.iter().map(|(code, obs)| (code.as_str(), obs))
    }
}
