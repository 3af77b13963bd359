use crate::models::MeasurementKind;
use chrono::{DateTime, FixedOffset};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "amedas-processor")]
#[command(about = "Fetch and visually encode JMA AMeDAS surface observations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the most recent observation time
    Latest,

    /// Fetch and join the station table with an observation snapshot
    Stations {
        #[arg(
            long,
            value_parser = parse_observation_time,
            help = "Observation time, e.g. 2024-01-15T12:30:00+09:00 [default: latest]"
        )]
        as_of: Option<DateTime<FixedOffset>>,

        #[arg(short, long, help = "Write station records to this file")]
        output: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = RecordFormat::Json)]
        format: RecordFormat,
    },

    /// Encode one measurement kind into render-ready points
    Encode {
        #[arg(
            short,
            long,
            value_parser = parse_kind,
            help = "Measurement key: temp, humidity, wind, precipitation1h, snow, ..."
        )]
        kind: MeasurementKind,

        #[arg(
            long,
            value_parser = parse_observation_time,
            help = "Observation time, e.g. 2024-01-15T12:30:00+09:00 [default: latest]"
        )]
        as_of: Option<DateTime<FixedOffset>>,

        #[arg(
            short,
            long,
            help = "Output JSON file path [default: output/amedas-{kind}-{YYYYMMDDHHmmss}.json]"
        )]
        output: Option<PathBuf>,
    },

    /// Print the measurement catalog
    Catalog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordFormat {
    Json,
    Csv,
}

fn parse_kind(s: &str) -> Result<MeasurementKind, String> {
    s.parse().map_err(|e: crate::error::ProcessingError| e.to_string())
}

fn parse_observation_time(s: &str) -> Result<DateTime<FixedOffset>, String> {
    crate::readers::parse_latest_time(s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_encode() {
        let cli = Cli::try_parse_from([
            "amedas-processor",
            "encode",
            "--kind",
            "temp",
            "--as-of",
            "2024-01-15T12:30:00+09:00",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Encode { kind, as_of, output } => {
                assert_eq!(kind, MeasurementKind::Temperature);
                assert!(as_of.is_some());
                assert!(output.is_none());
            }
            _ => panic!("expected encode"),
        }
    }

    #[test]
    fn test_rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["amedas-processor", "encode", "--kind", "pressure"]).is_err());
    }

    #[test]
    fn test_stations_defaults_to_json() {
        let cli = Cli::try_parse_from(["amedas-processor", "stations"]).unwrap();
        match cli.command {
            Commands::Stations { format, .. } => assert_eq!(format, RecordFormat::Json),
            _ => panic!("expected stations"),
        }
    }
}
