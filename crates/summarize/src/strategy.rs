use async_trait::async_trait;
use serde::Serialize;
use synopsis_core::DetailRatio;
use synopsis_ingest::{count_words, truncate_chars};
use synopsis_llm::{LlmError, SummaryModel};
use thiserror::Error;

use crate::budget::length_params;

/// Model output at or under this many characters (trimmed) is not a summary.
pub const MIN_USABLE_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Model,
    Extractive,
}

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error(transparent)]
    Model(#[from] LlmError),
    #[error("model output too short to use ({0} chars)")]
    Unusable(usize),
    #[error("nothing to summarize")]
    EmptyInput,
}

/// One way of turning a piece of text into a shorter one.
#[async_trait]
pub trait SummarizationStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    async fn summarize(&self, text: &str, detail: DetailRatio) -> Result<String, StrategyError>;
}

/// Delegates to a pretrained model with a token budget derived from the detail tier.
pub struct ModelStrategy {
    model: Box<dyn SummaryModel>,
}

impl ModelStrategy {
    pub fn new(model: Box<dyn SummaryModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }
}

#[async_trait]
impl SummarizationStrategy for ModelStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Model
    }

    async fn summarize(&self, text: &str, detail: DetailRatio) -> Result<String, StrategyError> {
        let text = match self.model.input_char_limit() {
            Some(limit) => truncate_chars(text, limit),
            None => text,
        };
        let input_words = count_words(text);
        if input_words == 0 {
            return Err(StrategyError::EmptyInput);
        }

        let params = length_params(input_words, detail.tier());
        tracing::debug!(
            model = self.model.name(),
            input_words,
            max_length = params.max_length,
            min_length = params.min_length,
            "calling summary model"
        );

        let output = self.model.summarize(text, params).await?;
        let output = output.trim();
        let len = output.chars().count();
        if len <= MIN_USABLE_CHARS {
            return Err(StrategyError::Unusable(len));
        }
        Ok(output.to_string())
    }
}
