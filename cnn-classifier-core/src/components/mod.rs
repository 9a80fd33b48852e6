//! Pipeline components — the units of work a stage is assembled from.

pub mod data_ingestion;

pub use data_ingestion::{DataIngestion, DownloadOutcome};
