use synopsis_ingest::ExtractionError;
use thiserror::Error;

/// Ways a single document run can end without a summary.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error("document too short: {chars} chars after normalization (need {min})")]
    EmptyDocument { chars: usize, min: usize },
    #[error("run cancelled")]
    Cancelled,
    #[error("background task failed: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for PipelineError {
    fn from(e: tokio::task::JoinError) -> Self {
        PipelineError::Task(e.to_string())
    }
}
