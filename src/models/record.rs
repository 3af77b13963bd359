use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{ProcessingError, Result};
use crate::models::{MeasurementKind, RawObservation, StationMetadata, Wind};

/// One station joined with its quality-checked readings for a snapshot
///
/// Every measurement is `None` unless the source reported it with a normal
/// quality flag. A reading of exactly 0 is data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct StationRecord {
    #[validate(length(min = 1))]
    pub code: String,

    pub name: String,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    // Precipitation (mm)
    pub precipitation_10m: Option<f64>,
    pub precipitation_1h: Option<f64>,
    pub precipitation_3h: Option<f64>,
    pub precipitation_24h: Option<f64>,

    pub wind: Option<Wind>,

    // °C
    pub temperature: Option<f64>,

    // Hours of sunshine in the last hour
    pub sunshine_1h: Option<f64>,

    // Snow (cm)
    pub snow_depth: Option<f64>,
    pub snowfall_6h: Option<f64>,
    pub snowfall_12h: Option<f64>,
    pub snowfall_24h: Option<f64>,

    // %
    pub humidity: Option<f64>,
}

impl StationRecord {
    /// Join station metadata with a raw observation, gating every field on its quality flag
    pub fn from_observation(station: &StationMetadata, observation: &RawObservation) -> Self {
        Self {
            code: station.code.clone(),
            name: station.name.clone(),
            longitude: station.longitude,
            latitude: station.latitude,
            precipitation_10m: observation.scalar(MeasurementKind::Precipitation10m),
            precipitation_1h: observation.scalar(MeasurementKind::Precipitation1h),
            precipitation_3h: observation.scalar(MeasurementKind::Precipitation3h),
            precipitation_24h: observation.scalar(MeasurementKind::Precipitation24h),
            wind: observation.wind(),
            temperature: observation.scalar(MeasurementKind::Temperature),
            sunshine_1h: observation.scalar(MeasurementKind::Sunshine1h),
            snow_depth: observation.scalar(MeasurementKind::SnowDepth),
            snowfall_6h: observation.scalar(MeasurementKind::Snowfall6h),
            snowfall_12h: observation.scalar(MeasurementKind::Snowfall12h),
            snowfall_24h: observation.scalar(MeasurementKind::Snowfall24h),
            humidity: observation.scalar(MeasurementKind::Humidity),
        }
    }

    pub fn builder() -> StationRecordBuilder {
        StationRecordBuilder::new()
    }

    /// `[longitude, latitude]`
    pub fn coordinates(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    /// Scalar value for a kind; wind yields its speed
    pub fn scalar(&self, kind: MeasurementKind) -> Option<f64> {
        match kind {
            MeasurementKind::Precipitation10m => self.precipitation_10m,
            MeasurementKind::Precipitation1h => self.precipitation_1h,
            MeasurementKind::Precipitation3h => self.precipitation_3h,
            MeasurementKind::Precipitation24h => self.precipitation_24h,
            MeasurementKind::Wind => self.wind.map(|w| w.speed),
            MeasurementKind::Temperature => self.temperature,
            MeasurementKind::Sunshine1h => self.sunshine_1h,
            MeasurementKind::SnowDepth => self.snow_depth,
            MeasurementKind::Snowfall6h => self.snowfall_6h,
            MeasurementKind::Snowfall12h => self.snowfall_12h,
            MeasurementKind::Snowfall24h => self.snowfall_24h,
            MeasurementKind::Humidity => self.humidity,
        }
    }

    fn slot_mut(&mut self, kind: MeasurementKind) -> Option<&mut Option<f64>> {
        match kind {
            MeasurementKind::Precipitation10m => Some(&mut self.precipitation_10m),
            MeasurementKind::Precipitation1h => Some(&mut self.precipitation_1h),
            MeasurementKind::Precipitation3h => Some(&mut self.precipitation_3h),
            MeasurementKind::Precipitation24h => Some(&mut self.precipitation_24h),
            MeasurementKind::Wind => None,
            MeasurementKind::Temperature => Some(&mut self.temperature),
            MeasurementKind::Sunshine1h => Some(&mut self.sunshine_1h),
            MeasurementKind::SnowDepth => Some(&mut self.snow_depth),
            MeasurementKind::Snowfall6h => Some(&mut self.snowfall_6h),
            MeasurementKind::Snowfall12h => Some(&mut self.snowfall_12h),
            MeasurementKind::Snowfall24h => Some(&mut self.snowfall_24h),
            MeasurementKind::Humidity => Some(&mut self.humidity),
        }
    }

    pub fn has(&self, kind: MeasurementKind) -> bool {
        self.scalar(kind).is_some()
    }

    pub fn available_kinds(&self) -> Vec<MeasurementKind> {
        MeasurementKind::ALL
            .into_iter()
            .filter(|kind| self.has(*kind))
            .collect()
    }

    pub fn coverage_score(&self) -> f64 {
        self.available_kinds().len() as f64 / MeasurementKind::ALL.len() as f64
    }
}

pub struct StationRecordBuilder {
    code: Option<String>,
    name: Option<String>,
    longitude: Option<f64>,
    latitude: Option<f64>,
    readings: Vec<(MeasurementKind, f64)>,
    wind: Option<Wind>,
}

impl Default for StationRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StationRecordBuilder {
    pub fn new() -> Self {
        Self {
            code: None,
            name: None,
            longitude: None,
            latitude: None,
            readings: Vec::new(),
            wind: None,
        }
    }

    pub fn code(mut self, code: &str) -> Self {
        self.code = Some(code.to_string());
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn coordinates(mut self, longitude: f64, latitude: f64) -> Self {
        self.longitude = Some(longitude);
        self.latitude = Some(latitude);
        self
    }

    /// Set a scalar reading; wind must go through [`Self::wind`]
    pub fn reading(mut self, kind: MeasurementKind, value: f64) -> Self {
        self.readings.push((kind, value));
        self
    }

    pub fn wind(mut self, speed: f64, direction: f64) -> Self {
        self.wind = Some(Wind::new(speed, direction));
        self
    }

    pub fn build(self) -> Result<StationRecord> {
        let code = self
            .code
            .ok_or_else(|| ProcessingError::MissingData("code".to_string()))?;
        let name = self
            .name
            .ok_or_else(|| ProcessingError::MissingData("name".to_string()))?;
        let longitude = self
            .longitude
            .ok_or_else(|| ProcessingError::MissingData("longitude".to_string()))?;
        let latitude = self
            .latitude
            .ok_or_else(|| ProcessingError::MissingData("latitude".to_string()))?;

        let station = StationMetadata::new(code, name, longitude, latitude);
        let mut record = StationRecord::from_observation(&station, &RawObservation::default());
        record.wind = self.wind;

        for (kind, value) in self.readings {
            let slot = record.slot_mut(kind).ok_or_else(|| {
                ProcessingError::InvalidFormat(format!(
                    "{} is a vector measurement; use wind() instead",
                    kind
                ))
            })?;
            *slot = Some(value);
        }

        record.validate()?;
        Ok(record)
    }
}
