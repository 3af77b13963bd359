/// JMA AMeDAS endpoints
pub const DEFAULT_LATEST_TIME_URL: &str = "https://www.jma.go.jp/bosai/amedas/data/latest_time.txt";
pub const DEFAULT_STATION_TABLE_URL: &str =
    "https://www.jma.go.jp/bosai/amedas/const/amedastable.json";
pub const DEFAULT_DATA_BASE_URL: &str = "https://www.jma.go.jp/bosai/amedas/data";

/// Snapshot files are addressed by their observation time in this layout
pub const SNAPSHOT_TIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// HTTP defaults
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("amedas-processor/", env!("CARGO_PKG_VERSION"));

/// Quality flag values
pub const QUALITY_NORMAL: i64 = 0;

/// Wind direction is reported on a 16-point compass
pub const COMPASS_POINTS: f64 = 16.0;
pub const DEGREES_PER_COMPASS_POINT: f64 = 360.0 / COMPASS_POINTS;

/// Hue endpoints of the catalog color ramp (blue -> red)
pub const HUE_LOW: f64 = 240.0;
pub const HUE_HIGH: f64 = 0.0;

/// Color used for points without a usable reading
pub const NO_DATA_COLOR: [u8; 4] = [128, 128, 128, 48];
pub const OPAQUE_ALPHA: u8 = 255;

/// Output defaults
pub const DEFAULT_OUTPUT_DIR: &str = "output";
