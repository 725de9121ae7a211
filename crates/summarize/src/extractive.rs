//! Frequency-scored sentence selection. Needs no model and never fails.

use std::collections::HashMap;

use async_trait::async_trait;
use synopsis_core::DetailRatio;
use synopsis_ingest::split_sentences;

use crate::strategy::{StrategyError, StrategyKind, SummarizationStrategy};

#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractiveStrategy;

#[async_trait]
impl SummarizationStrategy for ExtractiveStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Extractive
    }

    async fn summarize(&self, text: &str, detail: DetailRatio) -> Result<String, StrategyError> {
        Ok(extractive_summary(text, detail.value()))
    }
}

/// Keep the `ceil(n * ratio)` highest-scoring sentences in their original order.
///
/// A sentence scores the sum of the document-wide frequencies of its tokens.
/// Equal scores keep the earlier sentence. Text of two sentences or fewer is
/// returned as is.
pub fn extractive_summary(text: &str, ratio: f64) -> String {
    let sentences = split_sentences(text);
    let n = sentences.len();
    if n <= 2 {
        return text.trim().to_string();
    }

    let freq = word_frequencies(text);
    let mut scored: Vec<(usize, usize)> = sentences
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let score = tokens(s).map(|t| freq.get(&t).copied().unwrap_or(0)).sum();
            (i, score)
        })
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut keep: Vec<usize> = scored
        .into_iter()
        .take(keep_count(n, ratio))
        .map(|(i, _)| i)
        .collect();
    keep.sort_unstable();

    keep.iter()
        .map(|&i| sentences[i])
        .collect::<Vec<_>>()
        .join(" ")
}

fn keep_count(n: usize, ratio: f64) -> usize {
    // Epsilon absorbs products like 10 * 0.3 = 3.0000000000000004.
    let wanted = (n as f64 * ratio - 1e-9).ceil();
    (wanted.max(1.0) as usize).min(n)
}

fn word_frequencies(text: &str) -> HashMap<String, usize> {
    let mut freq = HashMap::new();
    for token in tokens(text) {
        *freq.entry(token).or_insert(0) += 1;
    }
    freq
}

/// Lowercase whitespace tokens with surrounding punctuation removed.
fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|w| !w.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PETS: &str = "The Cat sat. The cat played. The Cat slept. A Dog ran far away now.";

    #[test]
    fn picks_highest_scoring_sentences_in_order() {
        // the=3 cat=3: the three cat sentences score 7, the dog sentence 6.
        assert_eq!(extractive_summary(PETS, 0.34), "The Cat sat. The cat played.");
    }

    #[test]
    fn output_follows_document_order() {
        // The dog sentence scores highest but is still emitted second.
        let text = "The Cat slept. A Dog ran far away now. The Cat sat.";
        assert_eq!(
            extractive_summary(text, 0.6),
            "The Cat slept. A Dog ran far away now."
        );
    }

    #[test]
    fn two_sentences_are_returned_unchanged() {
        let text = "  First sentence stays here. Second sentence stays too.  ";
        assert_eq!(
            extractive_summary(text, 0.1),
            "First sentence stays here. Second sentence stays too."
        );
    }

    #[test]
    fn keeps_at_least_one_sentence() {
        let text = "Apples are red fruit. Bananas are yellow fruit. Cherries are red fruit too.";
        let summary = extractive_summary(text, 0.01);
        assert_eq!(split_sentences(&summary).len(), 1);
    }

    #[test]
    fn full_ratio_keeps_everything() {
        let text = "Apples are red fruit. Bananas are yellow fruit. Cherries are red fruit too.";
        assert_eq!(extractive_summary(text, 1.0), text);
    }

    #[test]
    fn deterministic() {
        let text = "Rust compiles to native code. Rust has no garbage collector. \
                    Memory safety comes from ownership. Ownership rules are checked at compile time. \
                    The borrow checker enforces these rules.";
        let a = extractive_summary(text, 0.4);
        let b = extractive_summary(text, 0.4);
        assert_eq!(a, b);
    }

    #[test]
    fn larger_ratio_keeps_a_superset() {
        let text = "Rust compiles to native code. Rust has no garbage collector. \
                    Memory safety comes from ownership. Ownership rules are checked at compile time. \
                    The borrow checker enforces these rules.";
        let low = extractive_summary(text, 0.2);
        let high = extractive_summary(text, 0.8);
        for sentence in split_sentences(&low) {
            assert!(high.contains(sentence));
        }
        assert!(high.split_whitespace().count() >= low.split_whitespace().count());
    }

    #[test]
    fn keep_count_rounds_up() {
        assert_eq!(keep_count(4, 0.34), 2);
        assert_eq!(keep_count(10, 0.3), 3);
        assert_eq!(keep_count(3, 0.0001), 1);
        assert_eq!(keep_count(5, 1.0), 5);
    }

    #[test]
    fn tokens_strip_punctuation_and_case() {
        let t: Vec<String> = tokens("The CAT, (sat)... --").collect();
        assert_eq!(t, vec!["the", "cat", "sat"]);
    }
}
