use async_trait::async_trait;

/// Output length bounds for one summarization call, in tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthParams {
    pub max_length: usize,
    pub min_length: usize,
}

/// A pretrained summarizer behind some inference endpoint.
#[async_trait]
pub trait SummaryModel: Send + Sync {
    /// Human-readable model identifier used in logs and headers.
    fn name(&self) -> &str;

    /// Maximum number of characters this backend may receive, if capped.
    fn input_char_limit(&self) -> Option<usize> {
        None
    }

    /// Summarize `text` within the given length bounds.
    async fn summarize(&self, text: &str, params: LengthParams) -> Result<String, LlmError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error: {status}: {body}")]
    ApiError { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    ParseError(String),
    #[error("model not configured: {0}")]
    NotConfigured(String),
}
