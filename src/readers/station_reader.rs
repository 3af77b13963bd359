use crate::error::{ProcessingError, Result};
use crate::models::{StationMetadata, StationTable};
use crate::utils::coordinates::{parse_dm_pair, validate_coordinates};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use validator::Validate;

/// Station entry as published in `amedastable.json`
#[derive(Debug, Deserialize)]
struct RawStationEntry {
    #[serde(rename = "kjName")]
    kj_name: String,
    #[serde(rename = "knName", default)]
    kn_name: Option<String>,
    #[serde(rename = "enName", default)]
    en_name: Option<String>,
    lat: Vec<f64>,
    lon: Vec<f64>,
    #[serde(default)]
    alt: Option<f64>,
    #[serde(rename = "type", default)]
    station_type: Option<String>,
}

pub struct StationReader {
    skip_invalid: bool,
}

impl StationReader {
    pub fn new() -> Self {
        Self { skip_invalid: true }
    }

    pub fn with_skip_invalid(skip_invalid: bool) -> Self {
        Self { skip_invalid }
    }

    /// Parse the station table: a JSON object keyed by station code
    pub fn parse_table(&self, json: &str) -> Result<StationTable> {
        let root: Map<String, Value> = match serde_json::from_str(json)? {
            Value::Object(map) => map,
            other => {
                return Err(ProcessingError::InvalidFormat(format!(
                    "Station table must be a JSON object, got {}",
                    json_type(&other)
                )))
            }
        };

        let mut table = StationTable::new();
        let mut skipped = 0usize;

        for (code, value) in root {
            match self.parse_station(&code, value) {
                Ok(station) => table.insert(station),
                Err(e) if self.skip_invalid => {
                    warn!(code = %code, error = %e, "Skipping malformed station entry");
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        debug!(stations = table.len(), skipped, "Parsed station table");
        Ok(table)
    }

    /// Parse a single station entry
    fn parse_station(&self, code: &str, value: Value) -> Result<StationMetadata> {
        let raw: RawStationEntry = serde_json::from_value(value)?;

        let latitude = parse_dm_pair(&raw.lat)?;
        let longitude = parse_dm_pair(&raw.lon)?;
        validate_coordinates(longitude, latitude)?;

        let station = StationMetadata {
            code: code.to_string(),
            name: raw.kj_name,
            kana_name: raw.kn_name,
            english_name: raw.en_name,
            latitude,
            longitude,
            altitude: raw.alt,
            station_type: raw.station_type,
        };

        station.validate()?;
        Ok(station)
    }
}

impl Default for StationReader {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
