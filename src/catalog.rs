//! Display settings for every measurement kind: name, unit, the range used
//! for normalization, and the color ramp.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

use crate::error::{ProcessingError, Result};
use crate::models::MeasurementKind;
use crate::utils::color::hue_ramp;
use crate::utils::scaling::normalize;

/// Maps a normalized value to RGB
pub type ColorFn = fn(f64) -> [u8; 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Single(&'static str),
    /// Magnitude and direction units of a vector measurement
    Pair {
        magnitude: &'static str,
        direction: &'static str,
    },
}

impl Unit {
    /// Unit of the displayed magnitude
    pub fn primary(&self) -> &'static str {
        match self {
            Unit::Single(unit) => unit,
            Unit::Pair { magnitude, .. } => magnitude,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Single(unit) => write!(f, "{}", unit),
            Unit::Pair {
                magnitude,
                direction,
            } => write!(f, "{}, {}", magnitude, direction),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MeasurementSetting {
    pub kind: MeasurementKind,
    pub name: &'static str,
    pub unit: Unit,
    pub min: f64,
    pub max: f64,
    pub color_fn: ColorFn,
}

impl MeasurementSetting {
    fn ramp(kind: MeasurementKind, name: &'static str, unit: Unit, min: f64, max: f64) -> Self {
        Self {
            kind,
            name,
            unit,
            min,
            max,
            color_fn: hue_ramp,
        }
    }

    pub fn normalize(&self, value: Option<f64>) -> Option<f64> {
        normalize(value, self.min, self.max)
    }

    pub fn color(&self, fraction: f64) -> [u8; 3] {
        (self.color_fn)(fraction)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ProcessingError::Config(format!(
                "{}: range bounds must be finite, got [{}, {}]",
                self.kind, self.min, self.max
            )));
        }

        if self.max <= self.min {
            return Err(ProcessingError::Config(format!(
                "{}: max ({}) must be greater than min ({})",
                self.kind, self.max, self.min
            )));
        }

        Ok(())
    }
}

/// Partial range override read from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct RangeOverride {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// One setting per measurement kind, indexed by [`MeasurementKind::index`]
#[derive(Debug, Clone)]
pub struct Catalog {
    settings: Vec<MeasurementSetting>,
}

impl Catalog {
    /// Ranges tuned for Japanese surface observations
    pub fn amedas_default() -> Self {
        use MeasurementKind::*;

        let mm = Unit::Single("mm");
        let cm = Unit::Single("cm");

        Self {
            settings: vec![
                MeasurementSetting::ramp(Precipitation10m, "Precipitation (10 min)", mm, 0.0, 10.0),
                MeasurementSetting::ramp(Precipitation1h, "Precipitation (1 h)", mm, 0.0, 50.0),
                MeasurementSetting::ramp(Precipitation3h, "Precipitation (3 h)", mm, 0.0, 100.0),
                MeasurementSetting::ramp(Precipitation24h, "Precipitation (24 h)", mm, 0.0, 300.0),
                MeasurementSetting::ramp(
                    Wind,
                    "Wind",
                    Unit::Pair {
                        magnitude: "m/s",
                        direction: "°",
                    },
                    0.0,
                    20.0,
                ),
                MeasurementSetting::ramp(Temperature, "Temperature", Unit::Single("°C"), -10.0, 30.0),
                MeasurementSetting::ramp(Sunshine1h, "Sunshine (1 h)", Unit::Single("h"), 0.0, 1.0),
                MeasurementSetting::ramp(SnowDepth, "Snow depth", cm, 0.0, 200.0),
                MeasurementSetting::ramp(Snowfall6h, "Snowfall (6 h)", cm, 0.0, 30.0),
                MeasurementSetting::ramp(Snowfall12h, "Snowfall (12 h)", cm, 0.0, 50.0),
                MeasurementSetting::ramp(Snowfall24h, "Snowfall (24 h)", cm, 0.0, 80.0),
                MeasurementSetting::ramp(Humidity, "Humidity", Unit::Single("%"), 0.0, 100.0),
            ],
        }
    }

    pub fn get(&self, kind: MeasurementKind) -> &MeasurementSetting {
        &self.settings[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &MeasurementSetting> {
        self.settings.iter()
    }

    /// Apply per-kind range overrides keyed by measurement key, then validate
    pub fn with_overrides(mut self, overrides: &HashMap<String, RangeOverride>) -> Result<Self> {
        for (key, range) in overrides {
            let kind: MeasurementKind = key.parse()?;
            let setting = &mut self.settings[kind.index()];
            if let Some(min) = range.min {
                setting.min = min;
            }
            if let Some(max) = range.max {
                setting.max = max;
            }
        }

        self.validate()?;
        Ok(self)
    }

    /// Reject zero-width or inverted ranges before any normalization happens
    pub fn validate(&self) -> Result<()> {
        if self.settings.len() != MeasurementKind::ALL.len() {
            return Err(ProcessingError::Config(format!(
                "catalog has {} settings, expected {}",
                self.settings.len(),
                MeasurementKind::ALL.len()
            )));
        }

        for (setting, kind) in self.settings.iter().zip(MeasurementKind::ALL) {
            if setting.kind != kind {
                return Err(ProcessingError::Config(format!(
                    "catalog entry {} is out of order (expected {})",
                    setting.kind, kind
                )));
            }
            setting.validate()?;
        }

        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::amedas_default()
    }
}
