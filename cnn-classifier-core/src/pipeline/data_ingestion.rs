//! Stage 01 — data ingestion.

use crate::components::{DataIngestion, DownloadOutcome};
use crate::config::ConfigurationManager;
use crate::error::Result;

pub const STAGE_NAME: &str = "Data Ingestion Stage";

/// Summary of one ingestion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionReport {
    pub download: DownloadOutcome,
    pub extracted_files: usize,
}

/// Fetches the dataset archive and unpacks it, in that order.
pub struct DataIngestionTrainingPipeline {
    config: ConfigurationManager,
    client: reqwest::Client,
}

impl DataIngestionTrainingPipeline {
    pub fn new(config: ConfigurationManager) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(config: ConfigurationManager, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    pub async fn main(&self) -> Result<IngestionReport> {
        let data_ingestion_config = self.config.get_data_ingestion_config()?;
        let data_ingestion =
            DataIngestion::with_client(data_ingestion_config, self.client.clone());
        let download = data_ingestion.download_file().await?;
        let extracted_files = data_ingestion.extract_zip_file()?;
        Ok(IngestionReport {
            download,
            extracted_files,
        })
    }
}
