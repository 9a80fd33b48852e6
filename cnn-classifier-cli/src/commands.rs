//! CLI subcommand handlers.

use crate::Commands;
use anyhow::Context;
use cnn_classifier_core::pipeline::data_ingestion::STAGE_NAME;
use cnn_classifier_core::utils::separate_and_move_images;
use cnn_classifier_core::{ConfigurationManager, DataIngestionTrainingPipeline, run_stage};
use std::path::Path;

const SEPARATE_STAGE_NAME: &str = "Separate Images Stage";

/// Handle a CLI subcommand.
pub async fn handle_command(
    command: Commands,
    config_path: &Path,
    params_path: &Path,
) -> anyhow::Result<()> {
    match command {
        Commands::Ingest => handle_ingest(config_path, params_path).await,
        Commands::SeparateImages { data_dir } => handle_separate_images(&data_dir).await,
    }
}

async fn handle_ingest(config_path: &Path, params_path: &Path) -> anyhow::Result<()> {
    let report = run_stage(STAGE_NAME, async {
        let manager = ConfigurationManager::new(config_path, params_path)?;
        DataIngestionTrainingPipeline::new(manager).main().await
    })
    .await
    .with_context(|| format!("{STAGE_NAME} failed"))?;

    tracing::debug!(
        download = ?report.download,
        extracted_files = report.extracted_files,
        "ingestion report"
    );
    Ok(())
}

async fn handle_separate_images(data_dir: &Path) -> anyhow::Result<()> {
    let summary = run_stage(SEPARATE_STAGE_NAME, async {
        separate_and_move_images(data_dir)
    })
    .await
    .with_context(|| format!("separating images in {}", data_dir.display()))?;

    tracing::info!(
        labels = ?summary.labels,
        moved = summary.moved,
        "images arranged by label"
    );
    Ok(())
}
