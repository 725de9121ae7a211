mod cli;
mod terminal;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

use synopsis_core::config::{load_dotenv, Config};
use synopsis_core::{FileInfo, ModelSelection};
use synopsis_summarize::{BatchEvent, BatchRunner, DocumentPipeline, SummaryRequest};

use crate::cli::{CliArgs, OutputFormat};
use crate::terminal::Terminal;

/// Conventional exit status after SIGINT.
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let terminal = Terminal::new(args.quiet || args.format == OutputFormat::Json);

    let mut config = match args.profile.as_deref() {
        Some(profile) => Config::for_profile(profile),
        None => Config::from_env(),
    };
    if let Some(max) = args.max_chunk_length {
        config.pipeline.max_chunk_length = max;
    }
    config.log_summary();

    let pipeline = Arc::new(DocumentPipeline::new(config));
    let model_name = match args.model {
        ModelSelection::Offline => &pipeline.config().offline.model,
        ModelSelection::Online => &pipeline.config().online.model,
    };
    terminal.print_banner(args.files.len(), args.detail.value(), model_name)?;

    let runner = BatchRunner::new(Arc::clone(&pipeline));
    let requests = args
        .files
        .iter()
        .map(|path| SummaryRequest::new(path, args.detail, args.model))
        .collect();
    let (handle, mut events) = runner.submit(requests);

    let cancel = handle.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, cancelling");
            cancel.cancel();
        }
    });

    let mut documents = Vec::new();
    while let Some(event) = events.recv().await {
        terminal.print_progress(&event)?;
        if let BatchEvent::Completed { index, result } = event {
            let file = FileInfo::from_path(&args.files[index]).ok();
            match args.format {
                OutputFormat::Text => terminal.print_result(&result, file.as_ref())?,
                OutputFormat::Json => documents.push(serde_json::json!({
                    "file": file,
                    "result": result,
                })),
            }
        }
    }

    let report = handle.wait().await.context("batch task failed")?;
    info!(batch_id = %report.batch_id, completed = report.completed, failed = report.failed, "done");

    if args.format == OutputFormat::Json {
        let output = serde_json::json!({
            "batch_id": report.batch_id,
            "documents": documents,
            "failed": report.failed,
            "cancelled": report.cancelled,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("failed to serialize results")?
        );
    }

    if report.cancelled {
        std::process::exit(EXIT_INTERRUPTED);
    }
    if report.completed == 0 && report.failed > 0 {
        bail!("no document could be summarized");
    }
    Ok(())
}
