pub mod color;
pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod logging;
pub mod progress;
pub mod scaling;

pub use color::{hsv_to_rgb, hue_ramp};
pub use constants::*;
pub use coordinates::dm_to_decimal;
pub use filename::{generate_default_points_filename, snapshot_url};
pub use progress::{FetchStage, ProgressReporter};
pub use scaling::{mix, normalize};
