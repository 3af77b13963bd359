use crate::catalog::Catalog;
use crate::cli::args::{Cli, Commands, RecordFormat};
use crate::config::AppConfig;
use crate::error::Result;
use crate::processors::{CoverageChecker, EncodingContext, StationPipeline, VisualEncoder};
use crate::readers::{ConcurrentReader, HttpSource};
use crate::utils::filename::generate_default_points_filename;
use crate::utils::logging::init_logging;
use crate::utils::progress::{FetchStage, ProgressReporter};
use crate::writers::{CsvWriter, JsonWriter};
use tracing::{debug, warn};

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let config = AppConfig::load(cli.config.as_deref())?;
    debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Latest => {
            let reader = ConcurrentReader::new(HttpSource::new(&config)?)
                .with_timeout(config.request_timeout());
            let observed_at = reader.resolve_latest_time().await?;
            println!("{}", observed_at.to_rfc3339());
        }

        Commands::Stations {
            as_of,
            output,
            format,
        } => {
            let progress = ProgressReporter::new_spinner("Fetching AMeDAS data...", false);
            let pipeline = StationPipeline::from_config(HttpSource::new(&config)?, &config);

            let (records, report) = pipeline.fetch_stations(as_of, Some(&progress)).await?;
            debug!(stages = ?progress.stages(), "Fetch stages");
            progress.finish_with_message(&format!("Fetched {} stations", records.len()));

            let checker = CoverageChecker::new();
            println!("\n{}", checker.generate_summary(&report));

            if let Some(path) = output {
                match format {
                    RecordFormat::Json => JsonWriter::new().write_records(&records, &path)?,
                    RecordFormat::Csv => CsvWriter::new().write_records(&records, &path)?,
                }
                println!("Wrote {} records to {}", records.len(), path.display());
            }
        }

        Commands::Encode {
            kind,
            as_of,
            output,
        } => {
            let catalog = config.catalog()?;
            let progress = ProgressReporter::new_spinner("Fetching AMeDAS data...", false);
            let pipeline = StationPipeline::from_config(HttpSource::new(&config)?, &config);

            let (records, report) = pipeline.fetch_stations(as_of, Some(&progress)).await?;
            if !report.is_complete() {
                for failure in &report.failures {
                    warn!(source = %failure.source, "Encoding with partial data: {}", failure.message);
                }
            }

            progress.stage(FetchStage::Encoding);
            let points = VisualEncoder::new(&catalog).encode(&records, EncodingContext::new(kind));

            progress.stage(FetchStage::Writing);
            let output_file = output
                .unwrap_or_else(|| generate_default_points_filename(kind, report.observed_at.as_ref()));
            JsonWriter::new().write_points(&points, &output_file)?;

            let with_data = points.iter().filter(|p| p.has_data()).count();
            progress.finish_with_message(&format!(
                "Encoded {} points ({} with data)",
                points.len(),
                with_data
            ));
            println!("Output file: {}", output_file.display());
        }

        Commands::Catalog => {
            let catalog = config.catalog()?;
            print!("{}", format_catalog(&catalog));
        }
    }

    Ok(())
}

fn format_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<18} {:<22} {:<10} {:>8} {:>8}\n",
        "KEY", "NAME", "UNIT", "MIN", "MAX"
    ));
    for setting in catalog.iter() {
        out.push_str(&format!(
            "{:<18} {:<22} {:<10} {:>8} {:>8}\n",
            setting.kind.key(),
            setting.name,
            setting.unit.to_string(),
            setting.min,
            setting.max
        ));
    }
    out
}
