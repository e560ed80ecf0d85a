use crate::config::ConfigError;
use assessor_render::RenderError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors of the report generation pipeline.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid report input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to write report to '{path}': {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
