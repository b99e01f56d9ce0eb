//! RCIP CLI - validate recipe files or directories
//!
//! Text or JSON report on stdout, logs on stderr.
//! Exit codes: 0 all valid, 2 any document invalid, 1 setup failure.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use rcip_core::{
    print::{render_result, render_summary},
    BatchEntry, BatchReport, SessionConfig, SessionError, ValidationSession,
    DEFAULT_SCHEMA_VERSION,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "rcip-cli")]
#[command(version, about = "RCIP Validator - validates recipe interchange documents")]
struct Cli {
    /// Recipe file or directory to validate
    target: PathBuf,

    /// RCIP schema version
    #[arg(long, default_value = DEFAULT_SCHEMA_VERSION)]
    schema_version: String,

    /// Path to a custom schema file (default: schemas/rcip-v<version>.json in the
    /// working directory, else the schema bundled with the validator)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Treat duplicate ingredient/step identifiers as errors
    #[arg(long)]
    strict_ids: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli, session: &mut ValidationSession) -> Result<Vec<BatchEntry>, SessionError> {
    session.init_from_path(cli.schema.as_deref())?;

    if cli.target.is_dir() {
        session.validate_directory(&cli.target)
    } else {
        // Missing files surface as a per-document input error.
        Ok(vec![session.validate_file(&cli.target)?])
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut session = ValidationSession::new(SessionConfig {
        schema_version: cli.schema_version.clone(),
        enforce_unique_ids: cli.strict_ids,
    });

    let entries = match run(&cli, &mut session) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let report = BatchReport::new(&session, entries);

    match cli.format {
        OutputFormat::Text => {
            for entry in &report.entries {
                println!("{}", render_result(&entry.name, &entry.result));
            }
            println!("{}", render_summary(&report.stats));
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: failed to serialize report: {e}");
                return ExitCode::FAILURE;
            }
        },
    }

    if report.all_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2) // Validation failure
    }
}
