//! Key topic detection from capitalized phrases and long technical words.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

static CAPITALIZED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").expect("capitalized phrase regex is valid")
});
static TECHNICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-z]{6,}\b").expect("technical term regex is valid"));

const STOP_WORDS: &[&str] = &[
    "the", "this", "that", "these", "those", "and", "but", "or", "for", "nor", "on", "at", "to",
    "from", "up", "by", "with", "without", "through", "over", "under", "above", "below",
    "example", "method", "system", "information",
];

/// Candidates at or under this length are discarded.
const MIN_CANDIDATE_CHARS: usize = 3;
/// Ranked phrases must be longer than this to be reported.
const MIN_TOPIC_CHARS: usize = 4;

/// Up to `top_n` title-cased topics, most frequent first.
pub fn extract_key_phrases(text: &str, top_n: usize) -> Vec<String> {
    let lowered = text.to_lowercase();
    let candidates = CAPITALIZED
        .find_iter(text)
        .chain(TECHNICAL.find_iter(&lowered))
        .map(|m| m.as_str());

    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for candidate in candidates {
        let key = candidate.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        if key.chars().count() <= MIN_CANDIDATE_CHARS || STOP_WORDS.contains(&key.as_str()) {
            continue;
        }
        *counts.entry(key).or_insert(0) += 1;
    }

    // Stable sort keeps first-seen order among equal counts.
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .map(|(phrase, _)| phrase)
        .filter(|phrase| phrase.chars().count() > MIN_TOPIC_CHARS)
        .take(top_n)
        .map(|phrase| title_case(&phrase))
        .collect()
}

fn title_case(phrase: &str) -> String {
    phrase
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
