//! One document from file to rendered summary.


use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use synopsis_core::{Config, DetailRatio, ModelSelection, SummaryResult};
use synopsis_ingest::{chunk_text, count_words, extract_file, normalize, ChunkConfig};
use synopsis_llm::{create_model, LlmError, SummaryModel};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::assemble::{assemble, RenderContext};
use crate::batch::BatchEvent;
use crate::cancel::CancelFlag;
use crate::engine::SummarizationEngine;
use crate::error::PipelineError;
use crate::keyphrase::extract_key_phrases;
use crate::recombine::Recombiner;
use crate::stats::SummaryStats;

/// Summary text of the degraded result for near-empty documents.
pub const TOO_SHORT_SUMMARY: &str = "Document too short for meaningful AI summarization.";
/// Nominal word count reported for the degraded result.
const TOO_SHORT_SUMMARY_WORDS: usize = 20;

/// Builds the model behind a [`SummarizationEngine`].
pub trait ModelSource: Send + Sync {
    fn model_for(
        &self,
        selection: ModelSelection,
        config: &Config,
    ) -> Result<Box<dyn SummaryModel>, LlmError>;
}

/// Models from configuration: a local Ollama server or the Hugging Face API.
pub struct ConfiguredModels;

impl ModelSource for ConfiguredModels {
    fn model_for(
        &self,
        selection: ModelSelection,
        config: &Config,
    ) -> Result<Box<dyn SummaryModel>, LlmError> {
        create_model(selection, config)
    }
}

#[derive(Debug, Clone)]
pub struct SummaryRequest {
    pub file_path: PathBuf,
    pub detail: DetailRatio,
    pub model: ModelSelection,
    /// Shown in the rendered header and copied into the result.
    pub source_filename: String,
}

impl SummaryRequest {
    pub fn new(file_path: impl Into<PathBuf>, detail: DetailRatio, model: ModelSelection) -> Self {
        let file_path = file_path.into();
        let source_filename = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            file_path,
            detail,
            model,
            source_filename,
        }
    }

    pub fn with_source_filename(mut self, name: impl Into<String>) -> Self {
        self.source_filename = name.into();
        self
    }
}

/// Progress points reported while a document is processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum Stage {
    Extracting,
    Normalizing,
    Chunking { chunks: usize },
    Summarizing { chunk: usize, total: usize },
    Recombining,
    Assembling,
}

/// Per-run cancellation and optional progress reporting.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    pub cancel: CancelFlag,
    progress: Option<(usize, UnboundedSender<BatchEvent>)>,
}

impl RunContext {
    pub fn new(cancel: CancelFlag) -> Self {
        Self {
            cancel,
            progress: None,
        }
    }

    /// Report stages as [`BatchEvent::Stage`] for the document at `index`.
    pub fn with_progress(mut self, index: usize, events: UnboundedSender<BatchEvent>) -> Self {
        self.progress = Some((index, events));
        self
    }

    fn report(&self, stage: Stage) {
        if let Some((index, events)) = &self.progress {
            // A dropped receiver only means nobody is watching.
            let _ = events.send(BatchEvent::Stage {
                index: *index,
                stage,
            });
        }
    }
}

pub struct DocumentPipeline {
    config: Config,
    models: Arc<dyn ModelSource>,
}

impl DocumentPipeline {
    pub fn new(config: Config) -> Self {
        Self::with_models(config, Arc::new(ConfiguredModels))
    }

    pub fn with_models(config: Config, models: Arc<dyn ModelSource>) -> Self {
        Self { config, models }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Engine for one run. A model that cannot be built leaves extraction only.
    pub fn engine_for(&self, selection: ModelSelection) -> SummarizationEngine {
        match self.models.model_for(selection, &self.config) {
            Ok(model) => SummarizationEngine::with_model(selection, model),
            Err(e) => {
                warn!(%selection, error = %e, "summary model unavailable, using extractive summarization");
                SummarizationEngine::extractive_only(selection)
            }
        }
    }

    /// Extract, summarize and render the file named by `request`.
    pub async fn summarize_file(
        &self,
        request: &SummaryRequest,
        ctx: &RunContext,
    ) -> Result<SummaryResult, PipelineError> {
        ctx.cancel.check()?;
        ctx.report(Stage::Extracting);

        let path = request.file_path.clone();
        let document = tokio::task::spawn_blocking(move || extract_file(&path)).await??;
        info!(
            file = %document.file_name(),
            kind = %document.kind,
            pages = document.pages_with_text,
            "document extracted"
        );

        self.summarize_text(&document.raw_text, request, ctx).await
    }

    /// Summarize text that has already been extracted.
    pub async fn summarize_text(
        &self,
        raw_text: &str,
        request: &SummaryRequest,
        ctx: &RunContext,
    ) -> Result<SummaryResult, PipelineError> {
        match self.run(raw_text, request, ctx).await {
            Err(PipelineError::EmptyDocument { chars, min }) => {
                warn!(
                    file = %request.source_filename,
                    chars,
                    min,
                    "document too short, returning placeholder summary"
                );
                Ok(placeholder_result(raw_text, request))
            }
            other => other,
        }
    }

    async fn run(
        &self,
        raw_text: &str,
        request: &SummaryRequest,
        ctx: &RunContext,
    ) -> Result<SummaryResult, PipelineError> {
        let settings = &self.config.pipeline;

        ctx.report(Stage::Normalizing);
        let normalized = normalize(raw_text);
        let chars = normalized.chars().count();
        if chars < settings.min_document_chars {
            return Err(PipelineError::EmptyDocument {
                chars,
                min: settings.min_document_chars,
            });
        }

        let key_topics = extract_key_phrases(&normalized, settings.top_topics);
        let chunks = chunk_text(
            &normalized,
            &ChunkConfig {
                max_chunk_length: settings.max_chunk_length,
            },
        );
        ctx.report(Stage::Chunking {
            chunks: chunks.len(),
        });

        let engine = self.engine_for(request.model);
        info!(
            file = %request.source_filename,
            chunks = chunks.len(),
            detail = request.detail.value(),
            model = engine.model_name(),
            "summarizing document"
        );

        let mut recombiner = Recombiner::new(settings.recombine_word_limit);
        for chunk in &chunks {
            ctx.report(Stage::Summarizing {
                chunk: chunk.ordinal + 1,
                total: chunks.len(),
            });
            let summary = engine.summarize(&chunk.text, request.detail, &ctx.cancel).await?;
            debug!(
                chunk = chunk.ordinal,
                strategy = ?summary.strategy,
                chars = summary.text.len(),
                "chunk summarized"
            );
            recombiner.push(summary);
        }

        ctx.report(Stage::Recombining);
        let combined = recombiner.finish(&engine, request.detail, &ctx.cancel).await?;

        ctx.report(Stage::Assembling);
        let stats = SummaryStats::compute(raw_text, &combined.text);
        let render = RenderContext {
            selection: engine.selection(),
            model_name: engine.has_model().then(|| engine.model_name()),
            tier: request.detail.tier(),
            source_filename: Some(&request.source_filename),
            fallback_used: combined.fallback_used,
        };
        let summary_text = assemble(&combined.text, &key_topics, &render);

        info!(
            file = %request.source_filename,
            original_words = stats.original_words,
            summary_words = stats.summary_words,
            compression_pct = stats.compression_ratio,
            fallback = combined.fallback_used,
            "summary complete"
        );

        Ok(SummaryResult {
            summary_text,
            original_words: stats.original_words,
            summary_words: stats.summary_words,
            compression_ratio: stats.compression_ratio,
            original_sentences: stats.original_sentences,
            summary_sentences: stats.summary_sentences,
            key_topics,
            model_used: request.model,
            source_file: request.source_filename.clone(),
            placeholder: false,
            fallback_used: combined.fallback_used,
        })
    }
}

fn placeholder_result(raw_text: &str, request: &SummaryRequest) -> SummaryResult {
    SummaryResult {
        summary_text: TOO_SHORT_SUMMARY.to_string(),
        original_words: count_words(raw_text),
        summary_words: TOO_SHORT_SUMMARY_WORDS,
        compression_ratio: 0.0,
        original_sentences: 1,
        summary_sentences: 1,
        key_topics: Vec::new(),
        model_used: request.model,
        source_file: request.source_filename.clone(),
        placeholder: true,
        fallback_used: false,
    }
}
