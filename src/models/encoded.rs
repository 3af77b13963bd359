use serde::{Deserialize, Serialize};

use crate::catalog::MeasurementSetting;

/// Marker drawn for a wind point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindIcon {
    /// Rotated arrow
    Arrow,
    /// Non-directional dot for calm or missing wind
    Calm,
}

/// Render-ready point for one station and one measurement kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedPoint {
    pub code: String,
    pub name: String,
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
    /// Reading rescaled against the catalog range; may fall outside [0, 1]
    pub normalized_value: Option<f64>,
    /// Reading in catalog units, for display (wind: speed)
    pub raw_value: Option<f64>,
    pub color: [u8; 4],
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub icon: Option<WindIcon>,
    /// Screen-space rotation in degrees
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub angle: Option<f64>,
}

impl EncodedPoint {
    pub fn has_data(&self) -> bool {
        self.normalized_value.is_some()
    }

    /// Hover text: `name（code）: value unit`
    pub fn tooltip(&self, setting: &MeasurementSetting) -> String {
        match self.raw_value {
            Some(value) => format!(
                "{}（{}）: {} {}",
                self.name,
                self.code,
                value,
                setting.unit.primary()
            ),
            None => format!("{}（{}）: -", self.name, self.code),
        }
    }
}
