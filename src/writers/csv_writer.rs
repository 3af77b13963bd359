use crate::error::Result;
use crate::models::StationRecord;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Flat CSV row: one column per measurement, wind split in two
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    code: &'a str,
    name: &'a str,
    longitude: f64,
    latitude: f64,
    precipitation10m: Option<f64>,
    precipitation1h: Option<f64>,
    precipitation3h: Option<f64>,
    precipitation24h: Option<f64>,
    wind_speed: Option<f64>,
    wind_direction: Option<f64>,
    temp: Option<f64>,
    sun1h: Option<f64>,
    snow: Option<f64>,
    snow6h: Option<f64>,
    snow12h: Option<f64>,
    snow24h: Option<f64>,
    humidity: Option<f64>,
}

impl<'a> From<&'a StationRecord> for CsvRow<'a> {
    fn from(record: &'a StationRecord) -> Self {
        Self {
            code: &record.code,
            name: &record.name,
            longitude: record.longitude,
            latitude: record.latitude,
            precipitation10m: record.precipitation_10m,
            precipitation1h: record.precipitation_1h,
            precipitation3h: record.precipitation_3h,
            precipitation24h: record.precipitation_24h,
            wind_speed: record.wind.map(|w| w.speed),
            wind_direction: record.wind.map(|w| w.direction),
            temp: record.temperature,
            sun1h: record.sunshine_1h,
            snow: record.snow_depth,
            snow6h: record.snowfall_6h,
            snow12h: record.snowfall_12h,
            snow24h: record.snowfall_24h,
            humidity: record.humidity,
        }
    }
}

pub struct CsvWriter;

impl CsvWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_records(&self, records: &[StationRecord], path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        self.write_to(records, File::create(path)?)?;
        info!(path = %path.display(), records = records.len(), "Wrote station records");
        Ok(())
    }

    /// Missing readings become empty cells
    pub fn write_to<W: Write>(&self, records: &[StationRecord], writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for record in records {
            csv_writer.serialize(CsvRow::from(record))?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}
