//! Configuration system for the classifier pipeline.
//!
//! Uses `figment` for layered configuration: YAML file -> environment.
//! The YAML file is read with [`read_yaml`] first so that an empty file is
//! reported as such; its contents then become the base layer, and variables
//! prefixed with `CNN_CLASSIFIER_` are merged on top
//! (`CNN_CLASSIFIER_DATA_INGESTION__SOURCE_URL`, etc.).

use crate::config_box::ConfigBox;
use crate::error::{ConfigError, Result};
use crate::utils::{create_directories, read_yaml};
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the pipeline configuration file.
pub const CONFIG_FILE_PATH: &str = "config/config.yaml";
/// Default location of the training parameters file.
pub const PARAMS_FILE_PATH: &str = "params.yaml";
/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "CNN_CLASSIFIER_";

/// Typed root of `config/config.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory under which every stage writes its artifacts.
    pub artifacts_root: PathBuf,
    pub data_ingestion: DataIngestionConfig,
}

/// Paths and source URL for the data ingestion stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataIngestionConfig {
    /// Working directory of the stage.
    pub root_dir: PathBuf,
    /// Where the dataset archive is fetched from.
    pub source_url: String,
    /// Where the downloaded archive is stored.
    pub local_data_file: PathBuf,
    /// Where the archive is extracted to.
    pub unzip_dir: PathBuf,
}

impl PipelineConfig {
    /// Validate the configuration, returning a list of problems.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.artifacts_root.as_os_str().is_empty() {
            problems.push("artifacts_root must not be empty".to_string());
        }
        problems.extend(self.data_ingestion.validate());
        problems
    }
}

impl DataIngestionConfig {
    /// Validate the ingestion section, returning a list of problems.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        match url::Url::parse(&self.source_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => problems.push(format!(
                "data_ingestion.source_url must use http or https, got '{}'",
                url.scheme()
            )),
            Err(e) => problems.push(format!(
                "data_ingestion.source_url '{}' is not a valid URL: {e}",
                self.source_url
            )),
        }

        for (name, path) in [
            ("root_dir", &self.root_dir),
            ("local_data_file", &self.local_data_file),
            ("unzip_dir", &self.unzip_dir),
        ] {
            if path.as_os_str().is_empty() {
                problems.push(format!("data_ingestion.{name} must not be empty"));
            }
        }

        problems
    }
}

/// Layer environment overrides on top of a parsed config file and extract
/// the typed configuration.
pub fn resolve_pipeline_config(
    file: &ConfigBox,
) -> std::result::Result<PipelineConfig, ConfigError> {
    let config: PipelineConfig = Figment::from(Serialized::defaults(file))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()?;

    let problems = config.validate();
    if !problems.is_empty() {
        return Err(ConfigError::Invalid {
            message: problems.join("; "),
        });
    }
    Ok(config)
}

/// Loads configuration and parameters and hands out per-stage configs.
#[derive(Debug, Clone)]
pub struct ConfigurationManager {
    config: PipelineConfig,
    params: ConfigBox,
}

impl ConfigurationManager {
    /// Read both files, apply environment overrides, validate, and make sure
    /// the artifacts root exists.
    pub fn new(config_path: &Path, params_path: &Path) -> Result<Self> {
        let file = read_yaml(config_path)?;
        let params = read_yaml(params_path)?;
        let config = resolve_pipeline_config(&file)?;

        create_directories(&[&config.artifacts_root], true)?;

        Ok(Self { config, params })
    }

    /// [`ConfigurationManager::new`] with [`CONFIG_FILE_PATH`] and
    /// [`PARAMS_FILE_PATH`], relative to the working directory.
    pub fn from_default_paths() -> Result<Self> {
        Self::new(Path::new(CONFIG_FILE_PATH), Path::new(PARAMS_FILE_PATH))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Training parameters. No stage in this crate reads them.
    pub fn params(&self) -> &ConfigBox {
        &self.params
    }

    /// Configuration for the data ingestion stage.
    ///
    /// Ensures the stage's root directory exists.
    pub fn get_data_ingestion_config(&self) -> Result<DataIngestionConfig> {
        let config = self.config.data_ingestion.clone();
        create_directories(&[&config.root_dir], true)?;
        Ok(config)
    }
}
