use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("detail ratio must be in (0, 1], got {0}")]
    InvalidDetailRatio(f64),

    #[error("unknown detail level: '{0}' (expected low, medium, high or a ratio)")]
    UnknownDetailLevel(String),

    #[error("unknown model selection: '{0}' (expected offline or online)")]
    UnknownModelSelection(String),
}
