use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StationMetadata {
    #[validate(length(min = 1))]
    pub code: String,

    /// Japanese display name (`kjName`)
    #[validate(length(min = 1))]
    pub name: String,

    pub kana_name: Option<String>,

    pub english_name: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    /// Metres above sea level
    pub altitude: Option<f64>,

    /// Station class letter (A, B, C, ...)
    pub station_type: Option<String>,
}

impl StationMetadata {
    pub fn new(code: String, name: String, longitude: f64, latitude: f64) -> Self {
        Self {
            code,
            name,
            kana_name: None,
            english_name: None,
            latitude,
            longitude,
            altitude: None,
            station_type: None,
        }
    }

    pub fn with_english_name(mut self, english_name: String) -> Self {
        self.english_name = Some(english_name);
        self
    }

    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    /// `[longitude, latitude]`, the order map layers expect
    pub fn coordinates(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

/// Static station metadata keyed by station code
#[derive(Debug, Clone, Default)]
pub struct StationTable {
    stations: HashMap<String, StationMetadata>,
}

impl StationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, station: StationMetadata) {
        self.stations.insert(station.code.clone(), station);
    }

    pub fn get(&self, code: &str) -> Option<&StationMetadata> {
        self.stations.get(code)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl FromIterator<StationMetadata> for StationTable {
    fn from_iter<I: IntoIterator<Item = StationMetadata>>(iter: I) -> Self {
        let mut table = StationTable::new();
        for station in iter {
            table.insert(station);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_validation() {
        let station = StationMetadata::new(
            "44132".to_string(),
            "東京".to_string(),
            139.75,
            35.69166,
        )
        .with_english_name("Tokyo".to_string())
        .with_altitude(25.2);

        assert!(station.validate().is_ok());
        assert_eq!(station.coordinates(), [139.75, 35.69166]);
    }

    #[test]
    fn test_invalid_station() {
        let station = StationMetadata::new("1".to_string(), "X".to_string(), 200.0, 35.0);
        assert!(station.validate().is_err());

        let station = StationMetadata::new("".to_string(), "X".to_string(), 135.0, 35.0);
        assert!(station.validate().is_err());
    }

    #[test]
    fn test_table_lookup() {
        let table: StationTable = vec![
            StationMetadata::new("A".to_string(), "X".to_string(), 135.5, 35.0),
            StationMetadata::new("B".to_string(), "Y".to_string(), 136.0, 36.0),
        ]
        .into_iter()
        .collect();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("A").map(|s| s.name.as_str()), Some("X"));
        assert!(table.get("C").is_none());
    }
}
