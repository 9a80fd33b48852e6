//! Pipeline stages and the wrapper that runs them.

pub mod data_ingestion;

pub use data_ingestion::{DataIngestionTrainingPipeline, IngestionReport};

use crate::error::Result;
use std::future::Future;

/// Run a stage between "started" and "completed" log banners.
///
/// A failing stage is logged with its full error chain and the error is
/// handed back unchanged; nothing is retried.
pub async fn run_stage<T, F>(name: &str, stage: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tracing::info!(">>>>>> stage {name} started <<<<<<");
    match stage.await {
        Ok(value) => {
            tracing::info!(">>>>>> stage {name} completed <<<<<<");
            Ok(value)
        }
        Err(e) => {
            tracing::error!(stage = name, error = ?e, "stage failed: {}", error_chain(&e));
            Err(e)
        }
    }
}

/// Render an error and all of its sources as `outer: inner: root`.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        // thiserror's `{0}` formatting already embeds the direct source.
        if !rendered.ends_with(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        source = cause.source();
    }
    rendered
}
