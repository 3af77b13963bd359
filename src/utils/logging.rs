use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::error::{ProcessingError, Result};

/// Install the global tracing subscriber
///
/// Logs go to stderr unless `log_file` is given; `verbose` lowers the level
/// from INFO to DEBUG.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let installed = match log_file {
        Some(path) => {
            let file = Arc::new(File::create(path)?);
            let subscriber = builder.with_ansi(false).with_writer(file).finish();
            tracing::subscriber::set_global_default(subscriber)
        }
        None => {
            let subscriber = builder.with_writer(std::io::stderr).finish();
            tracing::subscriber::set_global_default(subscriber)
        }
    };

    installed.map_err(|e| ProcessingError::Config(format!("Logging already initialised: {}", e)))
}
