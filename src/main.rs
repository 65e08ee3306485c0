//! Entry point for the missing-translations report.

use std::error::Error;
use std::io::{
    self,
    Write,
};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use translatable::report::{
    self,
    ReportOptions,
};

/// List missing translations for a translatable model
#[derive(Parser, Debug)]
#[command(name = "translatable-missing")]
#[command(version)]
#[command(about = "List missing translations for a translatable model", long_about = None)]
struct Args {
    /// The model to check (e.g. "Article")
    model: String,

    /// Record file (.json or .jsonl) or directory of record files (default: the config directory)
    #[arg(long)]
    records: Option<PathBuf>,

    /// Comma-separated list of locales to check
    #[arg(long, value_delimiter = ',')]
    locales: Vec<String>,

    /// Comma-separated list of attributes to check, glob patterns allowed
    #[arg(long, value_delimiter = ',')]
    attributes: Vec<String>,

    /// Directory containing .translatable.json (default: the current directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        },
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config_root = args.config.clone().map_or_else(std::env::current_dir, Ok)?;
    let options = ReportOptions {
        model: args.model.clone(),
        config_root,
        records: args.records.clone(),
        locales: args.locales.clone(),
        attributes: args.attributes.clone(),
    };

    let report = report::run(&options)?;

    let mut stdout = io::stdout().lock();
    write!(stdout, "{report}")?;
    stdout.flush()?;

    Ok(())
}
