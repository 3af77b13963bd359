use crate::models::{ObservationSnapshot, StationRecord, StationTable};
use tracing::{debug, warn};

/// Output of joining a snapshot against the station table
#[derive(Debug, Clone, Default)]
pub struct JoinResult {
    pub records: Vec<StationRecord>,
    /// Snapshot codes with no station table entry
    pub unknown_codes: Vec<String>,
}

pub struct DataMerger {
    warn_unknown: bool,
}

impl DataMerger {
    pub fn new() -> Self {
        Self { warn_unknown: true }
    }

    pub fn with_warn_unknown(warn_unknown: bool) -> Self {
        Self { warn_unknown }
    }

    /// Join snapshot entries with station metadata on station code
    ///
    /// Records come out in snapshot order. Stations that only appear in the
    /// table produce nothing; snapshot codes missing from the table are
    /// collected in [`JoinResult::unknown_codes`].
    pub fn merge(&self, stations: &StationTable, snapshot: &ObservationSnapshot) -> JoinResult {
        let mut result = JoinResult {
            records: Vec::with_capacity(snapshot.len()),
            unknown_codes: Vec::new(),
        };

        for (code, observation) in snapshot.iter() {
            match stations.get(code) {
                Some(station) => result
                    .records
                    .push(StationRecord::from_observation(station, observation)),
                None => {
                    if self.warn_unknown {
                        warn!(code = %code, "Observation for unknown station, skipping");
                    }
                    result.unknown_codes.push(code.to_string());
                }
            }
        }

        debug!(
            records = result.records.len(),
            unknown = result.unknown_codes.len(),
            "Joined snapshot with station table"
        );

        result
    }
}

impl Default for DataMerger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MeasurementKind, RawObservation, RawReading, StationMetadata};

    fn table() -> StationTable {
        vec![
            StationMetadata::new("A".to_string(), "Alpha".to_string(), 135.5, 35.0),
            StationMetadata::new("B".to_string(), "Beta".to_string(), 139.7, 35.7),
            StationMetadata::new("C".to_string(), "Gamma".to_string(), 141.3, 43.1),
        ]
        .into_iter()
        .collect()
    }

    fn temp(value: f64, flag: i64) -> RawObservation {
        RawObservation {
            temperature: Some(RawReading::new(value, flag)),
            ..Default::default()
        }
    }

    #[test]
    fn test_merge_follows_snapshot_order() {
        let mut snapshot = ObservationSnapshot::new(None);
        snapshot.push("C", temp(-2.0, 0));
        snapshot.push("A", temp(20.0, 0));

        let result = DataMerger::new().merge(&table(), &snapshot);
        let codes: Vec<&str> = result.records.iter().map(|r| r.code.as_str()).collect();

        // B is table-only and yields nothing
        assert_eq!(codes, vec!["C", "A"]);
        assert!(result.unknown_codes.is_empty());
        assert_eq!(result.records[1].coordinates(), [135.5, 35.0]);
    }

    #[test]
    fn test_unknown_codes_are_collected() {
        let mut snapshot = ObservationSnapshot::new(None);
        snapshot.push("A", temp(20.0, 0));
        snapshot.push("Z", temp(1.0, 0));

        let result = DataMerger::with_warn_unknown(false).merge(&table(), &snapshot);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.unknown_codes, vec!["Z".to_string()]);
    }

    #[test]
    fn test_flagged_reading_is_absent() {
        let mut snapshot = ObservationSnapshot::new(None);
        snapshot.push("A", temp(15.2, 1));
        snapshot.push("B", temp(0.0, 0));

        let result = DataMerger::new().merge(&table(), &snapshot);
        assert_eq!(result.records[0].scalar(MeasurementKind::Temperature), None);
        assert_eq!(result.records[1].scalar(MeasurementKind::Temperature), Some(0.0));
    }

    #[test]
    fn test_malformed_reading_still_joins() {
        let snapshot = crate::readers::SnapshotReader::new()
            .parse_snapshot(r#"{"A": {"temp": [20.0, 0], "humidity": [55]}}"#, None)
            .unwrap();

        let result = DataMerger::new().merge(&table(), &snapshot);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].temperature, Some(20.0));
        assert_eq!(result.records[0].humidity, None);
    }

    #[test]
    fn test_empty_inputs() {
        let result = DataMerger::new().merge(&StationTable::new(), &ObservationSnapshot::default());
        assert!(result.records.is_empty());
        assert!(result.unknown_codes.is_empty());
    }
}
