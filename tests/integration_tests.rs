use amedas_processor::catalog::Catalog;
use amedas_processor::config::FailurePolicy;
use amedas_processor::error::{ProcessingError, Result};
use amedas_processor::models::{EncodedPoint, MeasurementKind, StationRecord, WindIcon};
use amedas_processor::processors::{EncodingContext, StationPipeline, VisualEncoder};
use amedas_processor::readers::{AmedasSource, FileSource, SourceKind};
use amedas_processor::utils::{hsv_to_rgb, NO_DATA_COLOR};
use amedas_processor::writers::{CsvWriter, JsonWriter};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

const LATEST_TIME: &str = "2024-01-15T12:30:00+09:00\n";

const STATION_TABLE: &str = r#"{
    "A": {"type": "A", "elems": "11112010", "lat": [35, 0.0], "lon": [135, 30.0], "alt": 10,
          "kjName": "X", "knName": "エックス", "enName": "Ex"},
    "B": {"type": "B", "elems": "11112010", "lat": [43, 3.3], "lon": [141, 19.7], "alt": 17,
          "kjName": "札幌", "knName": "サッポロ", "enName": "Sapporo"},
    "T": {"type": "C", "elems": "00000000", "lat": [26, 12.4], "lon": [127, 41.2], "alt": 28,
          "kjName": "那覇", "knName": "ナハ", "enName": "Naha"}
}"#;

const SNAPSHOT: &str = r#"{
    "B": {
        "temp": [-3.5, 0],
        "humidity": [80, 0],
        "snow": [0, 0],
        "wind": [4.0, 0],
        "windDirection": [8, 0],
        "precipitation1h": [0.0, 0]
    },
    "A": {
        "temp": [20.0, 0],
        "humidity": [55, 1],
        "wind": [0.0, 0],
        "windDirection": [0, 0],
        "pressure": [1013.2, 0]
    },
    "UNKNOWN": {
        "temp": [1.0, 0]
    }
}"#;

fn write_fixture(root: &Path) -> Result<()> {
    fs::create_dir_all(root.join("map"))?;
    fs::write(root.join("latest_time.txt"), LATEST_TIME)?;
    fs::write(root.join("amedastable.json"), STATION_TABLE)?;
    fs::write(root.join("map").join("20240115123000.json"), SNAPSHOT)?;
    Ok(())
}

async fn fetch_fixture() -> Result<(TempDir, Vec<StationRecord>)> {
    let dir = TempDir::new()?;
    write_fixture(dir.path())?;

    let (records, _) = StationPipeline::new(FileSource::new(dir.path()))
        .fetch_stations(None, None)
        .await?;
    Ok((dir, records))
}

#[tokio::test]
async fn test_end_to_end_temperature() -> Result<()> {
    let dir = TempDir::new()?;
    write_fixture(dir.path())?;

    let (records, report) = StationPipeline::new(FileSource::new(dir.path()))
        .fetch_stations(None, None)
        .await?;

    // Snapshot order, table-only station T left out, unknown code reported
    let codes: Vec<&str> = records.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, vec!["B", "A"]);
    assert_eq!(report.unknown_codes, vec!["UNKNOWN".to_string()]);
    assert!(report.is_complete());

    let a = &records[1];
    assert_eq!(a.name, "X");
    assert_eq!(a.coordinates(), [135.5, 35.0]);
    assert_eq!(a.temperature, Some(20.0));
    assert_eq!(a.humidity, None);

    let catalog = Catalog::amedas_default();
    let points = VisualEncoder::new(&catalog)
        .encode(&records, EncodingContext::new(MeasurementKind::Temperature));

    let point = &points[1];
    assert_eq!(point.coordinates, [135.5, 35.0]);
    assert!((point.normalized_value.unwrap() - 0.75).abs() < 1e-12);
    let [r, g, b] = hsv_to_rgb(60.0, 1.0, 1.0);
    assert_eq!(point.color, [r, g, b, 255]);
    assert_eq!(point.tooltip(catalog.get(MeasurementKind::Temperature)), "X（A）: 20 °C");
    Ok(())
}

#[tokio::test]
async fn test_wind_encoding() -> Result<()> {
    let (_dir, records) = fetch_fixture().await?;
    let catalog = Catalog::amedas_default();

    let points =
        VisualEncoder::new(&catalog).encode(&records, EncodingContext::new(MeasurementKind::Wind));

    // Code 8 is a southerly: bearing 180, arrow drawn unrotated
    assert_eq!(points[0].raw_value, Some(4.0));
    assert_eq!(points[0].icon, Some(WindIcon::Arrow));
    assert_eq!(points[0].angle, Some(0.0));

    // Code 0 with zero speed is calm
    assert_eq!(points[1].icon, Some(WindIcon::Calm));
    assert_eq!(points[1].normalized_value, Some(0.0));
    Ok(())
}

#[tokio::test]
async fn test_zero_is_data_and_flagged_is_missing() -> Result<()> {
    let (_dir, records) = fetch_fixture().await?;
    let catalog = Catalog::amedas_default();
    let encoder = VisualEncoder::new(&catalog);

    let snow = encoder.encode(&records, EncodingContext::new(MeasurementKind::SnowDepth));
    assert_eq!(snow[0].normalized_value, Some(0.0));
    assert_eq!(snow[0].color, [0, 0, 255, 255]);
    assert_eq!(snow[1].normalized_value, None);
    assert_eq!(snow[1].color, NO_DATA_COLOR);

    let humidity = encoder.encode(&records, EncodingContext::new(MeasurementKind::Humidity));
    assert!(humidity[0].has_data());
    assert!(!humidity[1].has_data());
    Ok(())
}

#[tokio::test]
async fn test_switching_kind_needs_no_refetch() -> Result<()> {
    let (_dir, records) = fetch_fixture().await?;
    let catalog = Catalog::amedas_default();
    let encoder = VisualEncoder::new(&catalog);

    for kind in MeasurementKind::ALL {
        let first = encoder.encode(&records, EncodingContext::new(kind));
        let second = encoder.encode(&records, EncodingContext::new(kind));
        assert_eq!(first.len(), records.len());
        assert_eq!(first, second);
    }
    Ok(())
}

#[tokio::test]
async fn test_explicit_time_without_latest_file() -> Result<()> {
    let dir = TempDir::new()?;
    write_fixture(dir.path())?;
    fs::remove_file(dir.path().join("latest_time.txt"))?;

    let as_of = DateTime::parse_from_rfc3339("2024-01-15T12:30:00+09:00")?;
    let (records, report) = StationPipeline::new(FileSource::new(dir.path()))
        .fetch_stations(Some(as_of), None)
        .await?;

    assert_eq!(records.len(), 2);
    assert_eq!(report.observed_at, Some(as_of));
    Ok(())
}

#[tokio::test]
async fn test_missing_snapshot_degrades_or_fails() -> Result<()> {
    let dir = TempDir::new()?;
    write_fixture(dir.path())?;
    fs::remove_dir_all(dir.path().join("map"))?;

    let (records, report) = StationPipeline::new(FileSource::new(dir.path()))
        .fetch_stations(None, None)
        .await?;
    assert!(records.is_empty());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].source, SourceKind::Snapshot);

    let strict = StationPipeline::new(FileSource::new(dir.path()))
        .with_failure_policy(FailurePolicy::Strict)
        .fetch_stations(None, None)
        .await;
    assert!(matches!(
        strict,
        Err(ProcessingError::SourceUnavailable { .. })
    ));
    Ok(())
}

/// In-memory source whose snapshot endpoint never answers in time
struct StalledSnapshot;

#[async_trait]
impl AmedasSource for StalledSnapshot {
    async fn latest_time(&self) -> Result<String> {
        Ok(LATEST_TIME.to_string())
    }

    async fn station_table(&self) -> Result<String> {
        Ok(STATION_TABLE.to_string())
    }

    async fn snapshot(&self, _observed_at: &DateTime<FixedOffset>) -> Result<String> {
        tokio::time::sleep(Duration::from_secs(10)).await;
        Ok(SNAPSHOT.to_string())
    }
}

#[tokio::test]
async fn test_timeout_degrades_or_fails() {
    let (records, report) = StationPipeline::new(StalledSnapshot)
        .with_timeout(Duration::from_millis(50))
        .fetch_stations(None, None)
        .await
        .unwrap();
    assert!(records.is_empty());
    assert_eq!(report.failures[0].source, SourceKind::Snapshot);

    let strict = StationPipeline::new(StalledSnapshot)
        .with_timeout(Duration::from_millis(50))
        .with_failure_policy(FailurePolicy::Strict)
        .fetch_stations(None, None)
        .await;
    assert!(matches!(strict, Err(ProcessingError::Timeout { .. })));
}

#[tokio::test]
async fn test_writers_round_trip_points_and_records() -> Result<()> {
    let (dir, records) = fetch_fixture().await?;
    let catalog = Catalog::amedas_default();
    let points = VisualEncoder::new(&catalog)
        .encode(&records, EncodingContext::new(MeasurementKind::Temperature));

    let points_path = dir.path().join("output").join("points.json");
    JsonWriter::new().write_points(&points, &points_path)?;
    let read_back: Vec<EncodedPoint> = serde_json::from_str(&fs::read_to_string(&points_path)?)?;
    assert_eq!(read_back, points);

    let records_path = dir.path().join("output").join("records.json");
    JsonWriter::new().write_records(&records, &records_path)?;
    let read_back: Vec<StationRecord> = serde_json::from_str(&fs::read_to_string(&records_path)?)?;
    assert_eq!(read_back, records);

    let csv_path = dir.path().join("output").join("records.csv");
    CsvWriter::new().write_records(&records, &csv_path)?;
    let csv_text = fs::read_to_string(&csv_path)?;
    assert_eq!(csv_text.lines().count(), records.len() + 1);
    assert!(csv_text.lines().nth(1).unwrap().starts_with("B,札幌,"));
    Ok(())
}
