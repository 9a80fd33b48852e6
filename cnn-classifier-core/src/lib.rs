//! # cnn-classifier-core — data ingestion for a CNN image classifier
//!
//! The first stage of an image-classification training pipeline: download a
//! zipped dataset, unpack it under the artifacts directory, and the shared
//! helpers later stages build on.
//!
//! - [`config`]: typed, validated pipeline configuration (`figment` layered
//!   over `config/config.yaml`)
//! - [`config_box`]: schema-less mapping returned by YAML/JSON loaders
//! - [`utils`]: YAML/JSON/bincode I/O, directories, sizes, base64 images,
//!   label-folder arrangement
//! - [`components`]: the `DataIngestion` unit of work
//! - [`pipeline`]: stage orchestration and the stage runner

pub mod components;
pub mod config;
pub mod config_box;
pub mod error;
pub mod pipeline;
pub mod utils;

// Re-exports
pub use components::{DataIngestion, DownloadOutcome};
pub use config::{ConfigurationManager, DataIngestionConfig, PipelineConfig};
pub use config_box::ConfigBox;
pub use error::{ClassifierError, ConfigError, ErrorKind, FormatError, Result};
pub use pipeline::{DataIngestionTrainingPipeline, IngestionReport, run_stage};
