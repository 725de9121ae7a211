//! Joins chunk summaries into one document summary.

use synopsis_core::DetailRatio;
use synopsis_ingest::count_words;
use tracing::info;

use crate::cancel::CancelFlag;
use crate::engine::{ChunkSummary, SummarizationEngine};
use crate::error::PipelineError;
use crate::strategy::MIN_USABLE_CHARS;

/// Returned when no chunk produced anything usable.
pub const UNABLE_TO_SUMMARIZE: &str = "Unable to generate summary.";

#[derive(Debug, Clone, PartialEq)]
pub struct Recombined {
    pub text: String,
    /// Any contributing pass used the extractive strategy.
    pub fallback_used: bool,
    /// The joined text was long enough to be summarized again.
    pub resummarized: bool,
}

/// Accumulates chunk summaries in document order.
#[derive(Debug)]
pub struct Recombiner {
    word_limit: usize,
    summaries: Vec<String>,
    fallback_used: bool,
}

impl Recombiner {
    pub fn new(word_limit: usize) -> Self {
        Self {
            word_limit,
            summaries: Vec::new(),
            fallback_used: false,
        }
    }

    /// Keep `summary` if it carries more than a handful of characters.
    pub fn push(&mut self, summary: ChunkSummary) {
        let text = summary.text.trim();
        if text.chars().count() > MIN_USABLE_CHARS {
            self.fallback_used |= summary.is_fallback();
            self.summaries.push(text.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Join everything collected, running one more engine pass when the
    /// result is over the word limit.
    pub async fn finish(
        self,
        engine: &SummarizationEngine,
        detail: DetailRatio,
        cancel: &CancelFlag,
    ) -> Result<Recombined, PipelineError> {
        if self.summaries.is_empty() {
            return Ok(Recombined {
                text: UNABLE_TO_SUMMARIZE.to_string(),
                fallback_used: self.fallback_used,
                resummarized: false,
            });
        }

        let joined = self.summaries.join(" ");
        let words = count_words(&joined);
        if words <= self.word_limit {
            return Ok(Recombined {
                text: joined,
                fallback_used: self.fallback_used,
                resummarized: false,
            });
        }

        info!(words, limit = self.word_limit, "combined summary over limit, summarizing again");
        let pass = engine.summarize(&joined, detail, cancel).await?;
        Ok(Recombined {
            fallback_used: self.fallback_used || pass.is_fallback(),
            text: pass.text,
            resummarized: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::StrategyKind;
    use crate::test_support::{Script, ScriptedModel};
    use synopsis_core::ModelSelection;

    fn model_summary(text: &str) -> ChunkSummary {
        ChunkSummary {
            text: text.to_string(),
            strategy: StrategyKind::Model,
        }
    }

    #[tokio::test]
    async fn joins_usable_summaries_in_order() {
        let engine = SummarizationEngine::extractive_only(ModelSelection::Offline);
        let mut r = Recombiner::new(500);
        r.push(model_summary("First chunk summary here."));
        r.push(model_summary("  tiny  "));
        r.push(model_summary("Second chunk summary here."));
        assert_eq!(r.len(), 2);

        let out = r
            .finish(&engine, DetailRatio::medium(), &CancelFlag::new())
            .await
            .unwrap();
        assert_eq!(out.text, "First chunk summary here. Second chunk summary here.");
        assert!(!out.fallback_used);
        assert!(!out.resummarized);
    }

    #[tokio::test]
    async fn nothing_usable_yields_sentinel() {
        let engine = SummarizationEngine::extractive_only(ModelSelection::Offline);
        let mut r = Recombiner::new(500);
        r.push(model_summary("short"));
        assert!(r.is_empty());

        let out = r
            .finish(&engine, DetailRatio::medium(), &CancelFlag::new())
            .await
            .unwrap();
        assert_eq!(out.text, UNABLE_TO_SUMMARIZE);
    }

    #[tokio::test]
    async fn over_limit_gets_second_pass() {
        let model = ScriptedModel::new(Script::FirstWords(8));
        let engine = SummarizationEngine::with_model(ModelSelection::Offline, model.boxed());
        let mut r = Recombiner::new(10);
        r.push(model_summary("one two three four five six seven eight."));
        r.push(model_summary("nine ten eleven twelve thirteen fourteen."));

        let out = r
            .finish(&engine, DetailRatio::medium(), &CancelFlag::new())
            .await
            .unwrap();
        assert!(out.resummarized);
        assert_eq!(out.text, "one two three four five six seven eight.");
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn fallback_flag_is_carried() {
        let engine = SummarizationEngine::extractive_only(ModelSelection::Offline);
        let mut r = Recombiner::new(500);
        r.push(ChunkSummary {
            text: "Extracted sentence from the chunk.".into(),
            strategy: StrategyKind::Extractive,
        });
        let out = r
            .finish(&engine, DetailRatio::medium(), &CancelFlag::new())
            .await
            .unwrap();
        assert!(out.fallback_used);
    }
}
