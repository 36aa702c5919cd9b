//! CLI entry point for bench-result-schema
//!
//! Validates benchmark result records read from a file or stdin, prints the
//! accepted records as normalised JSON lines and reports every rejection.

use anyhow::Context;
use clap::{ArgAction, Parser};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use bench_result_schema::config::CliArgs;
use bench_result_schema::{AppConfig, ConfigError, IngestReport, Ingestor};

/// Validate benchmark result records (Test, Avg, Unit)
#[derive(Parser)]
#[command(name = "bench-result-schema")]
#[command(version, about, long_about = None)]
struct Args {
    /// Read records from FILE instead of stdin
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Input format (overrides BENCH_RESULT_SCHEMA_FORMAT)
    #[arg(
        short,
        long,
        value_name = "FORMAT",
        help = "Input format: 'json' (object or array) or 'jsonl' (one object per line)"
    )]
    format: Option<String>,

    /// Stop at the first rejected record
    #[arg(long, action = ArgAction::SetTrue)]
    fail_fast: bool,

    /// Do not print rejected records
    #[arg(short, long, action = ArgAction::SetTrue)]
    quiet: bool,

    /// Log filter directive (overrides BENCH_RESULT_SCHEMA_LOG)
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,
}

/// Convert CLI args to CliArgs struct for AppConfig
impl From<Args> for CliArgs {
    fn from(args: Args) -> Self {
        Self {
            input: args.input,
            format: args.format,
            fail_fast: args.fail_fast,
            quiet: args.quiet,
            log_level: args.log_level,
        }
    }
}

/// Exit status when the configuration or input cannot be used at all
const EXIT_FAILURE: u8 = 2;

/// Exit status when at least one record was rejected
const EXIT_REJECTED: u8 = 1;

/// Report a configuration error and pick the exit status
fn handle_config_error(error: ConfigError) -> ExitCode {
    eprintln!("Configuration error: {error}");
    ExitCode::from(EXIT_FAILURE)
}

fn init_logging(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(io::stderr)
        .init();
}

fn open_input(config: &AppConfig) -> anyhow::Result<Box<dyn BufRead>> {
    match config.input() {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Print one line per rejection
fn report_rejections<W: Write>(report: &IngestReport, mut err: W) -> io::Result<()> {
    for rejection in report.rejected() {
        writeln!(err, "{rejection}")?;
    }
    Ok(())
}

fn run(config: &AppConfig) -> anyhow::Result<IngestReport> {
    let reader = open_input(config)?;
    let ingestor = Ingestor::from_config(config);

    let report = ingestor
        .process(reader, io::stdout().lock())
        .context("failed to process input")?;

    if !config.quiet() {
        report_rejections(&report, io::stderr().lock())?;
    }
    Ok(report)
}

fn main() -> ExitCode {
    let config = match AppConfig::from_cli(CliArgs::from(Args::parse())) {
        Ok(config) => config,
        Err(error) => return handle_config_error(error),
    };

    init_logging(config.log_filter());

    match run(&config) {
        Ok(report) if report.is_clean() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(EXIT_REJECTED),
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
