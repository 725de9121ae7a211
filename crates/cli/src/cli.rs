use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use synopsis_core::{DetailRatio, ModelSelection};

/// Summarize PDF and plain-text documents.
///
/// Each file is extracted, cleaned, split into chunks and summarized with a
/// local or remote model. Extractive summarization takes over whenever the
/// model is unavailable.
#[derive(Parser, Debug)]
#[command(name = "synopsis", version, about = "Summarize PDF and text documents")]
pub struct CliArgs {
    /// Documents to summarize, processed in order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Detail level: low, medium, high, or a ratio in (0, 1]
    #[arg(long, short, default_value = "medium", env = "SYNOPSIS_DETAIL")]
    pub detail: DetailRatio,

    /// offline (local inference server) or online (remote inference API)
    #[arg(long, short, default_value = "offline", env = "SYNOPSIS_MODEL")]
    pub model: ModelSelection,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Override the maximum chunk length in characters
    #[arg(long)]
    pub max_chunk_length: Option<usize>,

    /// Configuration profile (prefix for environment variables)
    #[arg(long, env = "SYNOPSIS_PROFILE")]
    pub profile: Option<String>,

    /// Hide progress output
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        let args = CliArgs::try_parse_from(["synopsis", "report.pdf"]).unwrap();
        assert_eq!(args.files, vec![PathBuf::from("report.pdf")]);
        assert_eq!(args.format, OutputFormat::Text);
        assert!(args.max_chunk_length.is_none());
    }

    #[test]
    fn parses_detail_and_model() {
        let args = CliArgs::try_parse_from([
            "synopsis", "--detail", "0.25", "--model", "online", "--format", "json", "a.txt", "b.txt",
        ])
        .unwrap();
        assert_eq!(args.detail.value(), 0.25);
        assert_eq!(args.model, ModelSelection::Online);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.files.len(), 2);
    }

    #[test]
    fn rejects_bad_detail() {
        assert!(CliArgs::try_parse_from(["synopsis", "--detail", "1.5", "a.txt"]).is_err());
        assert!(CliArgs::try_parse_from(["synopsis"]).is_err());
    }
}
