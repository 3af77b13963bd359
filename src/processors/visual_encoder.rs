use crate::catalog::{Catalog, MeasurementSetting};
use crate::models::{EncodedPoint, MeasurementKind, StationRecord, WindIcon};
use crate::utils::color::with_alpha;
use crate::utils::constants::{NO_DATA_COLOR, OPAQUE_ALPHA};
use rayon::prelude::*;
use tracing::debug;

/// Which measurement the map is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingContext {
    pub kind: MeasurementKind,
}

impl EncodingContext {
    pub fn new(kind: MeasurementKind) -> Self {
        Self { kind }
    }
}

pub struct VisualEncoder<'a> {
    catalog: &'a Catalog,
}

impl<'a> VisualEncoder<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Encode every record for the selected kind
    ///
    /// One point per record, in input order. Records without a usable
    /// reading still produce a point, drawn in the no-data color.
    pub fn encode(&self, records: &[StationRecord], context: EncodingContext) -> Vec<EncodedPoint> {
        let setting = self.catalog.get(context.kind);

        let points: Vec<EncodedPoint> = records
            .par_iter()
            .map(|record| encode_record(record, setting))
            .collect();

        debug!(
            kind = %context.kind,
            points = points.len(),
            with_data = points.iter().filter(|p| p.has_data()).count(),
            "Encoded records"
        );

        points
    }
}

fn encode_record(record: &StationRecord, setting: &MeasurementSetting) -> EncodedPoint {
    let raw_value = record.scalar(setting.kind);
    let normalized_value = setting.normalize(raw_value);
    let color = match normalized_value {
        Some(fraction) => with_alpha(setting.color(fraction), OPAQUE_ALPHA),
        None => NO_DATA_COLOR,
    };

    let (icon, angle) = if setting.kind.is_vector() {
        let icon = match record.wind {
            Some(wind) if normalized_value.is_some() && !wind.is_calm() => WindIcon::Arrow,
            _ => WindIcon::Calm,
        };
        // Arrow glyph points down at 0°, bearings are where the wind blows from
        let angle = record.wind.map_or(0.0, |wind| 180.0 - wind.direction);
        (Some(icon), Some(angle))
    } else {
        (None, None)
    };

    EncodedPoint {
        code: record.code.clone(),
        name: record.name.clone(),
        coordinates: record.coordinates(),
        normalized_value,
        raw_value,
        color,
        icon,
        angle,
    }
}
