//! The summarization pipeline: chunk summaries, recombination, key topics,
//! rendering and the batch runner that drives it all off the caller's task.

pub mod assemble;
pub mod batch;
pub mod budget;
pub mod cancel;
pub mod engine;
pub mod error;
pub mod extractive;
pub mod keyphrase;
pub mod pipeline;
pub mod recombine;
pub mod stats;
pub mod strategy;

#[cfg(test)]
pub(crate) mod test_support;

pub use batch::{BatchEvent, BatchHandle, BatchReport, BatchRunner};
pub use cancel::CancelFlag;
pub use engine::{ChunkSummary, SummarizationEngine};
pub use error::PipelineError;
pub use pipeline::{DocumentPipeline, ModelSource, RunContext, Stage, SummaryRequest};
pub use strategy::{StrategyError, StrategyKind, SummarizationStrategy};
