pub mod coverage_checker;
pub mod data_merger;
pub mod pipeline;
pub mod visual_encoder;

pub use coverage_checker::{CoverageChecker, CoverageReport, KindCoverage};
pub use data_merger::{DataMerger, JoinResult};
pub use pipeline::StationPipeline;
pub use visual_encoder::{EncodingContext, VisualEncoder};
