use crate::models::{MeasurementKind, StationRecord};
use crate::readers::SourceFailure;
use chrono::{DateTime, FixedOffset};

#[derive(Debug, Clone)]
pub struct CoverageReport {
    pub observed_at: Option<DateTime<FixedOffset>>,
    pub total_records: usize,
    /// One entry per measurement kind, in catalog order
    pub kind_coverage: Vec<KindCoverage>,
    pub unknown_codes: Vec<String>,
    pub failures: Vec<SourceFailure>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindCoverage {
    pub kind: MeasurementKind,
    pub present: usize,
    pub missing: usize,
}

impl KindCoverage {
    pub fn ratio(&self) -> f64 {
        let total = self.present + self.missing;
        if total == 0 {
            0.0
        } else {
            self.present as f64 / total as f64
        }
    }
}

impl CoverageReport {
    pub fn coverage(&self, kind: MeasurementKind) -> Option<&KindCoverage> {
        self.kind_coverage.iter().find(|c| c.kind == kind)
    }

    /// True when every source answered
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct CoverageChecker;

impl CoverageChecker {
    pub fn new() -> Self {
        Self
    }

    /// Count how many stations carry a usable reading for each kind
    pub fn check_coverage(
        &self,
        records: &[StationRecord],
        observed_at: Option<DateTime<FixedOffset>>,
        unknown_codes: Vec<String>,
        failures: Vec<SourceFailure>,
    ) -> CoverageReport {
        let mut present = [0usize; MeasurementKind::ALL.len()];

        for record in records {
            for kind in record.available_kinds() {
                present[kind.index()] += 1;
            }
        }

        let kind_coverage = MeasurementKind::ALL
            .into_iter()
            .map(|kind| KindCoverage {
                kind,
                present: present[kind.index()],
                missing: records.len() - present[kind.index()],
            })
            .collect();

        CoverageReport {
            observed_at,
            total_records: records.len(),
            kind_coverage,
            unknown_codes,
            failures,
        }
    }

    pub fn generate_summary(&self, report: &CoverageReport) -> String {
        let mut summary = String::new();

        summary.push_str("=== AMeDAS Coverage Report ===\n");
        match report.observed_at {
            Some(t) => summary.push_str(&format!("Observation Time: {}\n", t.to_rfc3339())),
            None => summary.push_str("Observation Time: unknown\n"),
        }
        summary.push_str(&format!("Stations: {}\n", report.total_records));

        if report.total_records > 0 {
            summary.push_str("\nReadings per Measurement:\n");
            for coverage in &report.kind_coverage {
                summary.push_str(&format!(
                    "  {:<18} {:>5} present, {:>5} missing ({:.1}%)\n",
                    coverage.kind.key(),
                    coverage.present,
                    coverage.missing,
                    100.0 * coverage.ratio()
                ));
            }
        }

        if !report.unknown_codes.is_empty() {
            summary.push_str(&format!(
                "\nObservations Without Station Metadata: {}\n",
                report.unknown_codes.len()
            ));
            for code in report.unknown_codes.iter().take(10) {
                summary.push_str(&format!("  - {}\n", code));
            }
        }

        if !report.failures.is_empty() {
            summary.push_str("\nUnavailable Sources:\n");
            for failure in &report.failures {
                summary.push_str(&format!("  - {}: {}\n", failure.source, failure.message));
            }
        }

        summary
    }
}

impl Default for CoverageChecker {
    fn default() -> Self {
        Self::new()
    }
}
