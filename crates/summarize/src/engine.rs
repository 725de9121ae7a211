use synopsis_core::{DetailRatio, ModelSelection};
use synopsis_llm::SummaryModel;
use tracing::warn;

use crate::cancel::CancelFlag;
use crate::error::PipelineError;
use crate::extractive::{extractive_summary, ExtractiveStrategy};
use crate::strategy::{ModelStrategy, StrategyKind, SummarizationStrategy};

/// Summary of one piece of text plus the strategy that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkSummary {
    pub text: String,
    pub strategy: StrategyKind,
}

impl ChunkSummary {
    pub fn is_fallback(&self) -> bool {
        self.strategy == StrategyKind::Extractive
    }
}

/// Runs the primary strategy and falls back to extraction on any failure.
///
/// Built once per run. Model errors never escape; only cancellation does.
pub struct SummarizationEngine {
    primary: Box<dyn SummarizationStrategy>,
    selection: ModelSelection,
    model_name: String,
}

impl SummarizationEngine {
    pub fn with_model(selection: ModelSelection, model: Box<dyn SummaryModel>) -> Self {
        let strategy = ModelStrategy::new(model);
        let model_name = strategy.model_name().to_string();
        Self {
            primary: Box::new(strategy),
            selection,
            model_name,
        }
    }

    /// Engine for when no model could be constructed.
    pub fn extractive_only(selection: ModelSelection) -> Self {
        Self {
            primary: Box::new(ExtractiveStrategy),
            selection,
            model_name: "extractive".to_string(),
        }
    }

    pub fn selection(&self) -> ModelSelection {
        self.selection
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn has_model(&self) -> bool {
        self.primary.kind() == StrategyKind::Model
    }

    pub async fn summarize(
        &self,
        text: &str,
        detail: DetailRatio,
        cancel: &CancelFlag,
    ) -> Result<ChunkSummary, PipelineError> {
        cancel.check()?;

        match self.primary.summarize(text, detail).await {
            Ok(summary) => Ok(ChunkSummary {
                text: summary,
                strategy: self.primary.kind(),
            }),
            Err(e) => {
                warn!(
                    model = %self.model_name,
                    selection = %self.selection,
                    error = %e,
                    "model summarization failed, falling back to extractive"
                );
                Ok(ChunkSummary {
                    text: extractive_summary(text, detail.value()),
                    strategy: StrategyKind::Extractive,
                })
            }
        }
    }
}
