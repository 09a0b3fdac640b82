use std::path::PathBuf;

use thiserror::Error;

/// Everything that can end a submission without a report.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Please upload a file first!")]
    NoFileSelected,

    #[error("Upload failed: {status}")]
    Upload { status: String },

    #[error("Invalid response: {0}")]
    Parse(String),

    #[error("Request failed: {0}")]
    Network(String),

    #[error("Cannot read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Upload task stopped: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for SubmitError {
    fn from(e: tokio::task::JoinError) -> Self {
        SubmitError::Task(e.to_string())
    }
}
