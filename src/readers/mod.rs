pub mod concurrent_reader;
pub mod file_source;
pub mod snapshot_reader;
pub mod source;
pub mod station_reader;

pub use concurrent_reader::{ConcurrentReader, SourceFailure, StationData};
pub use file_source::FileSource;
pub use snapshot_reader::{parse_latest_time, SnapshotReader};
pub use source::{AmedasSource, HttpSource, SourceKind};
pub use station_reader::StationReader;
