use anyhow::Result;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{self, Write};
use synopsis_core::{FileInfo, SummaryResult};
use synopsis_summarize::{BatchEvent, Stage};

/// Color scheme for terminal output.
struct Colors;

impl Colors {
    const HEADER: Color = Color::Magenta;
    const PROGRESS: Color = Color::DarkGrey;
    const DONE: Color = Color::Green;
    const WARN: Color = Color::Yellow;
    const ERROR: Color = Color::Red;
    const STATS: Color = Color::Cyan;
}

/// Progress goes to stderr, summaries to stdout.
pub struct Terminal {
    quiet: bool,
}

impl Terminal {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn print_banner(&self, files: usize, detail: f64, model: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stderr = io::stderr();
        execute!(
            stderr,
            SetForegroundColor(Colors::HEADER),
            Print("synopsis"),
            ResetColor,
            Print(" - Document Summarizer\n"),
            SetForegroundColor(Colors::PROGRESS),
            Print(format!("{files} file(s) | detail {detail:.2} | model {model}\n")),
            Print("Ctrl+C cancels the remaining work.\n"),
            Print("---\n"),
            ResetColor,
        )?;
        Ok(())
    }

    /// One line per batch event; completed results are printed separately.
    pub fn print_progress(&self, event: &BatchEvent) -> Result<()> {
        let (color, line) = match event {
            BatchEvent::Started {
                index,
                total,
                source_file,
            } => (Colors::HEADER, format!("[{}/{}] {source_file}", index + 1, total)),
            BatchEvent::Stage { stage, .. } => (Colors::PROGRESS, format!("  {}", stage_text(stage))),
            BatchEvent::Completed { result, .. } => (
                Colors::DONE,
                format!("  done ({:.1}% shorter)", result.compression_ratio),
            ),
            BatchEvent::Failed {
                source_file, error, ..
            } => {
                return self.print_error(&format!("{source_file}: {error}"));
            }
            BatchEvent::Cancelled { remaining, .. } => (
                Colors::WARN,
                format!("cancelled, {remaining} document(s) not summarized"),
            ),
            BatchEvent::Finished {
                completed, failed, ..
            } => (
                Colors::HEADER,
                format!("---\n{completed} summarized, {failed} failed"),
            ),
        };
        if self.quiet {
            return Ok(());
        }
        let mut stderr = io::stderr();
        execute!(
            stderr,
            SetForegroundColor(color),
            Print(line),
            Print("\n"),
            ResetColor,
        )?;
        Ok(())
    }

    /// The rendered summary followed by file details and statistics.
    pub fn print_result(&self, result: &SummaryResult, file: Option<&FileInfo>) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, Print("\n"), Print(&result.summary_text), Print("\n\n"))?;

        let mut stats = Vec::new();
        if let Some(file) = file {
            stats.push(format!("File: {} ({:.2} MB)", file.filename, file.size_mb));
        }
        stats.push(format!(
            "Words: {} -> {} ({:.1}% compression)",
            result.original_words, result.summary_words, result.compression_ratio
        ));
        stats.push(format!(
            "Sentences: {} -> {}",
            result.original_sentences, result.summary_sentences
        ));
        if result.placeholder {
            stats.push("Document was too short for a full summary.".to_string());
        }

        execute!(
            stdout,
            SetForegroundColor(Colors::STATS),
            Print(stats.join("\n")),
            Print("\n"),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    pub fn print_error(&self, msg: &str) -> Result<()> {
        let mut stderr = io::stderr();
        execute!(
            stderr,
            SetForegroundColor(Colors::ERROR),
            Print(format!("Error: {msg}\n")),
            ResetColor,
        )?;
        Ok(())
    }
}

fn stage_text(stage: &Stage) -> String {
    match stage {
        Stage::Extracting => "extracting text".to_string(),
        Stage::Normalizing => "cleaning text".to_string(),
        Stage::Chunking { chunks } => format!("split into {chunks} chunk(s)"),
        Stage::Summarizing { chunk, total } => format!("summarizing chunk {chunk}/{total}"),
        Stage::Recombining => "combining chunk summaries".to_string(),
        Stage::Assembling => "formatting summary".to_string(),
    }
}
