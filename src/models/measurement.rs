use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ProcessingError;
use crate::utils::constants::DEGREES_PER_COMPASS_POINT;

/// Measurement kinds reported by AMeDAS stations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasurementKind {
    #[serde(rename = "precipitation10m")]
    Precipitation10m,
    #[serde(rename = "precipitation1h")]
    Precipitation1h,
    #[serde(rename = "precipitation3h")]
    Precipitation3h,
    #[serde(rename = "precipitation24h")]
    Precipitation24h,
    #[serde(rename = "wind")]
    Wind,
    #[serde(rename = "temp")]
    Temperature,
    #[serde(rename = "sun1h")]
    Sunshine1h,
    #[serde(rename = "snow")]
    SnowDepth,
    #[serde(rename = "snow6h")]
    Snowfall6h,
    #[serde(rename = "snow12h")]
    Snowfall12h,
    #[serde(rename = "snow24h")]
    Snowfall24h,
    #[serde(rename = "humidity")]
    Humidity,
}

impl MeasurementKind {
    pub const ALL: [MeasurementKind; 12] = [
        MeasurementKind::Precipitation10m,
        MeasurementKind::Precipitation1h,
        MeasurementKind::Precipitation3h,
        MeasurementKind::Precipitation24h,
        MeasurementKind::Wind,
        MeasurementKind::Temperature,
        MeasurementKind::Sunshine1h,
        MeasurementKind::SnowDepth,
        MeasurementKind::Snowfall6h,
        MeasurementKind::Snowfall12h,
        MeasurementKind::Snowfall24h,
        MeasurementKind::Humidity,
    ];

    /// Key used by the snapshot payload, config overrides and the CLI
    pub fn key(&self) -> &'static str {
        match self {
            MeasurementKind::Precipitation10m => "precipitation10m",
            MeasurementKind::Precipitation1h => "precipitation1h",
            MeasurementKind::Precipitation3h => "precipitation3h",
            MeasurementKind::Precipitation24h => "precipitation24h",
            MeasurementKind::Wind => "wind",
            MeasurementKind::Temperature => "temp",
            MeasurementKind::Sunshine1h => "sun1h",
            MeasurementKind::SnowDepth => "snow",
            MeasurementKind::Snowfall6h => "snow6h",
            MeasurementKind::Snowfall12h => "snow12h",
            MeasurementKind::Snowfall24h => "snow24h",
            MeasurementKind::Humidity => "humidity",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, MeasurementKind::Wind)
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for MeasurementKind {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        MeasurementKind::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ProcessingError::UnknownMeasurement(s.to_string()))
    }
}

/// A quality-checked wind observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// m/s
    pub speed: f64,
    /// Bearing the wind blows from, degrees clockwise from north
    pub direction: f64,
}

impl Wind {
    pub fn new(speed: f64, direction: f64) -> Self {
        Self { speed, direction }
    }

    /// Build from a 16-point compass code (`code * 360 / 16` degrees)
    pub fn from_compass(speed: f64, code: f64) -> Self {
        Self::new(speed, code * DEGREES_PER_COMPASS_POINT)
    }

    /// Direction code 0 marks calm by convention
    pub fn is_calm(&self) -> bool {
        self.direction == 0.0
    }

    /// `(u, v)` components: eastward and northward velocity of the air
    pub fn components(&self) -> (f64, f64) {
        let theta = self.direction.to_radians();
        (-self.speed * theta.sin(), -self.speed * theta.cos())
    }
}
