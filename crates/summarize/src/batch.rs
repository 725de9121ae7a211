//! Runs a list of documents on a background task and streams progress.

use std::sync::Arc;

use serde::Serialize;
use synopsis_core::SummaryResult;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use crate::cancel::CancelFlag;
use crate::error::PipelineError;
use crate::pipeline::{DocumentPipeline, RunContext, Stage, SummaryRequest};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BatchEvent {
    Started {
        index: usize,
        total: usize,
        source_file: String,
    },
    Stage {
        index: usize,
        stage: Stage,
    },
    Completed {
        index: usize,
        result: Box<SummaryResult>,
    },
    Failed {
        index: usize,
        source_file: String,
        error: String,
    },
    /// Documents from `index` on were not summarized.
    Cancelled {
        index: usize,
        remaining: usize,
    },
    Finished {
        batch_id: Uuid,
        completed: usize,
        failed: usize,
        cancelled: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub batch_id: Uuid,
    pub completed: usize,
    pub failed: usize,
    pub cancelled: bool,
}

pub struct BatchHandle {
    id: Uuid,
    cancel: CancelFlag,
    task: JoinHandle<BatchReport>,
}

impl BatchHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Stop before the next model call or document.
    pub fn cancel(&self) {
        info!(batch_id = %self.id, "batch cancellation requested");
        self.cancel.cancel();
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub async fn wait(self) -> Result<BatchReport, PipelineError> {
        Ok(self.task.await?)
    }
}

pub struct BatchRunner {
    pipeline: Arc<DocumentPipeline>,
}

impl BatchRunner {
    pub fn new(pipeline: Arc<DocumentPipeline>) -> Self {
        Self { pipeline }
    }

    /// Start summarizing `requests` in order. Must be called inside a tokio runtime.
    pub fn submit(&self, requests: Vec<SummaryRequest>) -> (BatchHandle, UnboundedReceiver<BatchEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        let cancel = CancelFlag::new();

        info!(batch_id = %id, documents = requests.len(), "batch submitted");
        let task = tokio::spawn(run_batch(
            Arc::clone(&self.pipeline),
            requests,
            id,
            cancel.clone(),
            tx,
        ));

        (BatchHandle { id, cancel, task }, rx)
    }
}

async fn run_batch(
    pipeline: Arc<DocumentPipeline>,
    requests: Vec<SummaryRequest>,
    batch_id: Uuid,
    cancel: CancelFlag,
    events: UnboundedSender<BatchEvent>,
) -> BatchReport {
    let total = requests.len();
    let mut report = BatchReport {
        batch_id,
        completed: 0,
        failed: 0,
        cancelled: false,
    };
    // Send errors mean the receiver is gone; the batch still runs to completion.
    let emit = |event: BatchEvent| {
        let _ = events.send(event);
    };

    for (index, request) in requests.iter().enumerate() {
        if cancel.is_cancelled() {
            emit(BatchEvent::Cancelled {
                index,
                remaining: total - index,
            });
            report.cancelled = true;
            break;
        }

        emit(BatchEvent::Started {
            index,
            total,
            source_file: request.source_filename.clone(),
        });
        let ctx = RunContext::new(cancel.clone()).with_progress(index, events.clone());

        match pipeline.summarize_file(request, &ctx).await {
            Ok(result) => {
                report.completed += 1;
                emit(BatchEvent::Completed {
                    index,
                    result: Box::new(result),
                });
            }
            Err(PipelineError::Cancelled) => {
                emit(BatchEvent::Cancelled {
                    index,
                    remaining: total - index,
                });
                report.cancelled = true;
                break;
            }
            Err(e) => {
                warn!(batch_id = %batch_id, file = %request.source_filename, error = %e, "document failed");
                report.failed += 1;
                emit(BatchEvent::Failed {
                    index,
                    source_file: request.source_filename.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        batch_id = %batch_id,
        completed = report.completed,
        failed = report.failed,
        cancelled = report.cancelled,
        "batch finished"
    );
    emit(BatchEvent::Finished {
        batch_id,
        completed: report.completed,
        failed: report.failed,
        cancelled: report.cancelled,
    });
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{river_document, StaticModels};
    use std::io::Write;
    use synopsis_core::{Config, DetailRatio, ModelSelection};

    fn runner() -> BatchRunner {
        let pipeline = DocumentPipeline::with_models(Config::default(), Arc::new(StaticModels(None)));
        BatchRunner::new(Arc::new(pipeline))
    }

    fn text_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    fn request(path: &std::path::Path) -> SummaryRequest {
        SummaryRequest::new(path, DetailRatio::medium(), ModelSelection::Offline)
    }

    async fn drain(mut rx: UnboundedReceiver<BatchEvent>) -> Vec<BatchEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn failures_do_not_stop_the_batch() {
        let good = text_file(&river_document());
        let short = text_file("Hi.");
        let requests = vec![
            request(good.path()),
            request(std::path::Path::new("/no/such/file.txt")),
            request(short.path()),
        ];

        let (handle, rx) = runner().submit(requests);
        let id = handle.id();
        let events = drain(rx).await;
        let report = handle.wait().await.unwrap();

        assert_eq!(
            report,
            BatchReport {
                batch_id: id,
                completed: 2,
                failed: 1,
                cancelled: false
            }
        );

        let outcomes: Vec<(usize, &str)> = events
            .iter()
            .filter_map(|e| match e {
                BatchEvent::Completed { index, .. } => Some((*index, "completed")),
                BatchEvent::Failed { index, .. } => Some((*index, "failed")),
                _ => None,
            })
            .collect();
        assert_eq!(outcomes, vec![(0, "completed"), (1, "failed"), (2, "completed")]);

        match &events[events.len() - 1] {
            BatchEvent::Finished { batch_id, .. } => assert_eq!(*batch_id, id),
            other => panic!("expected Finished, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn reports_stages_for_each_document() {
        let good = text_file(&river_document());
        let (handle, rx) = runner().submit(vec![request(good.path())]);
        let events = drain(rx).await;
        handle.wait().await.unwrap();

        let stages: Vec<&Stage> = events
            .iter()
            .filter_map(|e| match e {
                BatchEvent::Stage { stage, .. } => Some(stage),
                _ => None,
            })
            .collect();
        assert_eq!(stages.first(), Some(&&Stage::Extracting));
        assert!(stages.contains(&&Stage::Recombining));
        assert_eq!(stages.last(), Some(&&Stage::Assembling));
    }

    #[tokio::test]
    async fn cancel_before_start_skips_everything() {
        let good = text_file(&river_document());
        let (handle, rx) = runner().submit(vec![request(good.path()), request(good.path())]);
        handle.cancel();

        let events = drain(rx).await;
        let report = handle.wait().await.unwrap();
        assert!(report.cancelled);
        assert_eq!(report.completed, 0);
        assert!(matches!(
            events[0],
            BatchEvent::Cancelled {
                index: 0,
                remaining: 2
            }
        ));
    }

    #[test]
    fn events_serialize_with_tag() {
        let event = BatchEvent::Cancelled {
            index: 1,
            remaining: 3,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "cancelled");
        assert_eq!(json["remaining"], 3);
    }
}
