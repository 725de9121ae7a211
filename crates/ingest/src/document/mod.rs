pub mod chunker;
mod pdf;
mod txt;

use std::path::{Path, PathBuf};

use synopsis_core::{Document, FileKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("text file is not valid UTF-8: {0}")]
    Decode(String),
    #[error("PDF extraction failed: {0}")]
    PdfError(String),
}

/// A page of extracted text.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// 1-based page number (for PDFs). For text files, always 1.
    pub page_number: usize,
    pub text: String,
}

/// Read a file from disk and extract its text, dispatching on extension.
pub fn extract_file(path: &Path) -> Result<Document, ExtractionError> {
    let bytes = std::fs::read(path).map_err(|source| ExtractionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let kind = FileKind::from_path(path);
    let pages = extract_bytes(&bytes, kind)?;

    tracing::debug!(
        path = %path.display(),
        kind = %kind,
        pages = pages.len(),
        "extracted document text"
    );

    Ok(Document {
        source_path: path.to_path_buf(),
        kind,
        pages_with_text: pages.len(),
        raw_text: join_pages(&pages),
    })
}

/// Extract pages from in-memory file contents.
pub fn extract_bytes(bytes: &[u8], kind: FileKind) -> Result<Vec<PageContent>, ExtractionError> {
    match kind {
        FileKind::Pdf => pdf::extract_pdf(bytes),
        FileKind::Text => txt::extract_txt(bytes),
    }
}

fn join_pages(pages: &[PageContent]) -> String {
    pages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
