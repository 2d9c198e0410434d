//! CLI entry point for the EBAS conversion tool.
//!
//! Provides subcommands for converting NOAA NMHC flask files to EBAS
//! NASA-Ames and for splitting inhomogeneous input files.

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use ebas_convert::{
    ebas::OutputRegistry,
    noaa_flask::{DEFAULT_REVISION, convert_file},
    output::{ConversionRecord, RunSummary, append_record, print_json},
    split::split_file,
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "ebas-convert")]
#[command(about = "Convert atmospheric measurement data to EBAS NASA-Ames", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert NOAA NMHC flask files to EBAS NASA-Ames
    NoaaFlask {
        /// Input file(s), NOAA NMHC flask file format
        #[arg(value_name = "FILE", required = true)]
        filenames: Vec<PathBuf>,

        /// Data revision to be set in output files
        #[arg(long, default_value = DEFAULT_REVISION)]
        revision: String,

        /// Directory to write the output files to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// CSV file to append per-file conversion records to
        #[arg(long)]
        report: Option<String>,
    },
    /// Split a flask file whose sampling metadata changes mid-file into
    /// homogeneous series files
    Split {
        /// Input file, NOAA NMHC flask file format
        #[arg(value_name = "FILE")]
        filename: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/ebas_convert.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("ebas_convert.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::NoaaFlask {
            filenames,
            revision,
            output_dir,
            report,
        } => run_noaa_flask(&filenames, &revision, &output_dir, report.as_deref())?,
        Commands::Split { filename } => {
            let parts = split_file(&filename)?;
            info!(
                file = %filename.display(),
                parts = parts.len(),
                "split finished"
            );
            0
        }
    };

    // flush the non-blocking appender before exiting, process::exit skips
    // destructors
    drop(file_guard);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

/// Converts all input files, writes the collected output files, and
/// returns the process exit code.
fn run_noaa_flask(
    filenames: &[PathBuf],
    revision: &str,
    output_dir: &Path,
    report: Option<&str>,
) -> Result<i32> {
    let mut registry = OutputRegistry::new();
    let mut summary = RunSummary::default();

    for path in filenames {
        summary.files += 1;
        match convert_file(&mut registry, path, revision) {
            Ok(outcome) => {
                info!(
                    file = %path.display(),
                    station = outcome.station_code,
                    parameter = outcome.parameter,
                    samples = outcome.samples,
                    "file converted"
                );
                summary.ok_files += 1;
                summary.warnings += outcome.warnings;
                if let Some(report) = report {
                    append_record(
                        report,
                        &ConversionRecord::ok(
                            path,
                            outcome.station_code,
                            outcome.parameter,
                            outcome.samples,
                            outcome.warnings,
                        ),
                    )?;
                }
            }
            Err(err) => {
                error!(file = %path.display(), error = %err, "skipping file because of errors");
                summary.failed_files += 1;
                if let Some(report) = report {
                    append_record(report, &ConversionRecord::failed(path, err.to_string()))?;
                }
            }
        }
    }

    // all output files get the run end time as revision date
    let written = registry.write_all(output_dir, Utc::now())?;
    summary.output_files = written.len();

    summary.log();
    print_json(&summary)?;
    Ok(summary.exit_code())
}
