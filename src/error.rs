use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures that abort a run. Malformed input lines are never errors; the
/// tree builder skips them.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid template: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("failed to render page: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("failed to serialize tree: {0}")]
    Json(#[from] serde_json::Error),
}
