use crate::error::Result;
use crate::models::{EncodedPoint, StationRecord};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

pub struct JsonWriter {
    pretty: bool,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Write encoded points as a JSON array
    pub fn write_points(&self, points: &[EncodedPoint], path: &Path) -> Result<()> {
        self.write_file(points, path)?;
        info!(path = %path.display(), points = points.len(), "Wrote encoded points");
        Ok(())
    }

    /// Write station records as a JSON array
    pub fn write_records(&self, records: &[StationRecord], path: &Path) -> Result<()> {
        self.write_file(records, path)?;
        info!(path = %path.display(), records = records.len(), "Wrote station records");
        Ok(())
    }

    /// Serialize any slice to an arbitrary writer, e.g. stdout
    pub fn write_to<T: Serialize, W: Write>(&self, items: &[T], writer: W) -> Result<()> {
        let mut writer = writer;
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, items)?;
        } else {
            serde_json::to_writer(&mut writer, items)?;
        }
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    fn write_file<T: Serialize>(&self, items: &[T], path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(path)?;
        self.write_to(items, BufWriter::new(file))
    }
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}
