//! Sentence splitting shared by the chunker, the extractive strategy and
//! the statistics so every stage agrees on what a sentence is.

use std::sync::LazyLock;

use regex::Regex;

/// Sentences whose body (terminators excluded) is shorter than this are dropped.
pub const MIN_SENTENCE_CHARS: usize = 10;

static SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]*").expect("sentence regex is valid"));

/// Split on runs of `.`, `!` and `?`. Each returned slice is trimmed and keeps
/// its terminator run; fragments under [`MIN_SENTENCE_CHARS`] are discarded.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| sentence_body(s).chars().count() >= MIN_SENTENCE_CHARS)
        .collect()
}

/// The sentence without its trailing terminators.
pub fn sentence_body(sentence: &str) -> &str {
    sentence
        .trim_end_matches(|c| matches!(c, '.' | '!' | '?'))
        .trim_end()
}

pub fn count_sentences(text: &str) -> usize {
    split_sentences(text).len()
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
