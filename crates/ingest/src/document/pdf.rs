use std::any::Any;
use std::fmt::Display;
use std::panic::{self, UnwindSafe};

use super::{ExtractionError, PageContent};

/// Extract text page by page. Pages without extractable text (scans, images)
/// are skipped rather than failing the document.
pub fn extract_pdf(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    let texts = guard_parser(|| pdf_extract::extract_text_from_mem_by_pages(bytes))?;

    let pages = collect_pages(texts);
    if pages.is_empty() {
        tracing::warn!("PDF contains no extractable text (image-only or blank)");
    }
    Ok(pages)
}

/// pdf-extract asserts on some malformed structure (a page without a
/// MediaBox, dangling object references) instead of returning an error.
/// Contain those so one bad file fails alone instead of taking down the batch.
fn guard_parser<T, E, F>(parse: F) -> Result<T, ExtractionError>
where
    E: Display,
    F: FnOnce() -> Result<T, E> + UnwindSafe,
{
    match panic::catch_unwind(parse) {
        Ok(result) => result.map_err(|e| ExtractionError::PdfError(e.to_string())),
        Err(payload) => {
            let reason = panic_reason(payload.as_ref());
            tracing::warn!(reason = %reason, "PDF parser panicked");
            Err(ExtractionError::PdfError(format!(
                "malformed PDF (parser panicked: {reason})"
            )))
        }
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown".to_string()
    }
}

/// Number pages from 1 in document order, dropping the ones with no text.
fn collect_pages(texts: Vec<String>) -> Vec<PageContent> {
    let mut skipped = 0usize;
    let pages: Vec<PageContent> = texts
        .into_iter()
        .enumerate()
        .filter_map(|(i, page_text)| {
            let trimmed = page_text.trim();
            if trimmed.is_empty() {
                skipped += 1;
                None
            } else {
                Some(PageContent {
                    page_number: i + 1,
                    text: trimmed.to_string(),
                })
            }
        })
        .collect();

    if skipped > 0 {
        tracing::debug!(skipped, "skipped PDF pages without text");
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(pages: &[&str]) -> Vec<String> {
        pages.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn numbers_pages_from_one() {
        let pages = collect_pages(texts(&["Page one text", "Page two text\n"]));
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[1].page_number, 2);
        assert_eq!(pages[1].text, "Page two text");
    }

    #[test]
    fn skips_image_only_pages() {
        let pages = collect_pages(texts(&["Intro", "   \n ", "Conclusion"]));
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].text, "Intro");
        assert_eq!(pages[1].page_number, 3);
        assert_eq!(pages[1].text, "Conclusion");
    }

    #[test]
    fn blank_document_has_no_pages() {
        assert!(collect_pages(texts(&[" \n", ""])).is_empty());
        assert!(collect_pages(Vec::new()).is_empty());
    }

    #[test]
    fn parser_error_becomes_pdf_error() {
        let err = guard_parser(|| Err::<(), _>("bad xref")).unwrap_err();
        match err {
            ExtractionError::PdfError(msg) => assert_eq!(msg, "bad xref"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parser_panic_becomes_pdf_error() {
        let err = guard_parser(|| -> Result<(), String> { panic!("MediaBox") }).unwrap_err();
        match err {
            ExtractionError::PdfError(msg) => {
                assert!(msg.contains("parser panicked"), "{msg}");
                assert!(msg.contains("MediaBox"), "{msg}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
