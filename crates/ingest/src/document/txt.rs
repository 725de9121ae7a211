use super::{ExtractionError, PageContent};

pub fn extract_txt(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| ExtractionError::Decode(e.to_string()))?
        .trim_start_matches('\u{feff}');

    Ok(vec![PageContent {
        page_number: 1,
        text: text.trim().to_string(),
    }])
}
