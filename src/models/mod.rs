pub mod encoded;
pub mod measurement;
pub mod observation;
pub mod record;
pub mod station;

pub use encoded::{EncodedPoint, WindIcon};
pub use measurement::{MeasurementKind, Wind};
pub use observation::{ObservationSnapshot, QualityFlag, RawObservation, RawReading};
pub use record::{StationRecord, StationRecordBuilder};
pub use station::{StationMetadata, StationTable};
