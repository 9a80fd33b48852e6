//! cnn-classifier CLI — runs the data pipeline stages from the terminal.
//!
//! With no subcommand the data ingestion stage runs.

mod commands;

use anyhow::Context;
use clap::Parser;
use cnn_classifier_core::config::{CONFIG_FILE_PATH, PARAMS_FILE_PATH};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// File name of the JSON log inside `--log-dir`.
const LOG_FILE_NAME: &str = "running_logs.log";

/// CNN classifier: data pipeline for leaf-disease image classification
#[derive(Parser, Debug)]
#[command(name = "cnn-classifier", version, about, long_about = None)]
struct Cli {
    /// Pipeline configuration file
    #[arg(short, long, default_value = CONFIG_FILE_PATH)]
    config: PathBuf,

    /// Training parameters file
    #[arg(short, long, default_value = PARAMS_FILE_PATH)]
    params: PathBuf,

    /// Directory for the JSON log file
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors to the terminal
    #[arg(short, long)]
    quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Download and extract the dataset archive (the default)
    Ingest,
    /// Move images into one folder per label, as listed in train.csv
    SeparateImages {
        /// Directory holding train.csv and train_images/
        #[arg(long, default_value = "artifacts/data_ingestion")]
        data_dir: PathBuf,
    },
}

fn terminal_filter(verbose: u8, quiet: bool) -> &'static str {
    match verbose {
        0 if quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Human-readable layer for stderr
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(terminal_filter(cli.verbose, cli.quiet)));

    // JSON file layer for structured logging
    std::fs::create_dir_all(&cli.log_dir)
        .with_context(|| format!("creating log directory {}", cli.log_dir.display()))?;
    let file_appender = tracing_appender::rolling::never(&cli.log_dir, LOG_FILE_NAME);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let command = cli.command.unwrap_or(Commands::Ingest);
    commands::handle_command(command, &cli.config, &cli.params).await
}
