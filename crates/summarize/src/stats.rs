use serde::Serialize;
use synopsis_ingest::{count_sentences, count_words};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub original_words: usize,
    pub summary_words: usize,
    pub original_sentences: usize,
    pub summary_sentences: usize,
    /// Percentage of words removed, in `[0, 100]`.
    pub compression_ratio: f64,
}

impl SummaryStats {
    pub fn compute(original: &str, summary: &str) -> Self {
        let original_words = count_words(original);
        let summary_words = count_words(summary);
        Self {
            original_words,
            summary_words,
            original_sentences: count_sentences(original),
            summary_sentences: count_sentences(summary),
            compression_ratio: compression_ratio(original_words, summary_words),
        }
    }
}

pub fn compression_ratio(original_words: usize, summary_words: usize) -> f64 {
    if original_words == 0 {
        return 0.0;
    }
    let reduction = (original_words as f64 - summary_words as f64) / original_words as f64 * 100.0;
    reduction.clamp(0.0, 100.0)
}
