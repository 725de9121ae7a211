use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Source format, decided from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Pdf,
    Text,
}

impl FileKind {
    /// `.pdf` (any case) is a PDF; everything else is read as text.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("pdf") => FileKind::Pdf,
            _ => FileKind::Text,
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::Pdf => write!(f, "pdf"),
            FileKind::Text => write!(f, "text"),
        }
    }
}

/// Raw text pulled out of a file. Immutable once extracted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub source_path: PathBuf,
    pub kind: FileKind,
    pub raw_text: String,
    /// Pages that produced text (1 for plain text files).
    pub pages_with_text: usize,
}

impl Document {
    /// File name component of the source path, or the whole path when it has none.
    pub fn file_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source_path.display().to_string())
    }
}

/// File metadata handed to presentation/export collaborators next to a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub filename: String,
    pub size_mb: f64,
}

impl FileInfo {
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let meta = std::fs::metadata(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            filename,
            size_mb: meta.len() as f64 / (1024.0 * 1024.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_kind_from_extension() {
        assert_eq!(FileKind::from_path(Path::new("report.pdf")), FileKind::Pdf);
        assert_eq!(FileKind::from_path(Path::new("REPORT.PDF")), FileKind::Pdf);
        assert_eq!(FileKind::from_path(Path::new("notes.txt")), FileKind::Text);
        assert_eq!(FileKind::from_path(Path::new("README")), FileKind::Text);
    }

    #[test]
    fn document_file_name() {
        let doc = Document {
            source_path: PathBuf::from("/tmp/docs/paper.pdf"),
            kind: FileKind::Pdf,
            raw_text: String::new(),
            pages_with_text: 0,
        };
        assert_eq!(doc.file_name(), "paper.pdf");
    }
}
