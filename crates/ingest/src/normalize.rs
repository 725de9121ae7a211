//! Cleanup of raw extracted text.
//!
//! PDF extraction glues words together (`endOfLine`, `page12Title`) and
//! hard-wraps lines mid-sentence. Normalization repairs the joins and
//! collapses every whitespace run, newlines included, so wrapped sentences
//! stay whole. What remains shorter than the minimum line length is noise.

use std::sync::LazyLock;

use regex::Regex;

/// Text shorter than this (after trimming) is treated as extraction noise.
pub const MIN_LINE_CHARS: usize = 20;

static LOWER_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("lower/upper regex is valid"));
static LETTER_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-zA-Z])([0-9])").expect("letter/digit regex is valid"));
static DIGIT_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9])([a-zA-Z])").expect("digit/letter regex is valid"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

/// Normalize extracted text. Pure and idempotent.
pub fn normalize(raw: &str) -> String {
    let text = LOWER_UPPER.replace_all(raw, "$1 $2");
    let text = LETTER_DIGIT.replace_all(&text, "$1 $2");
    let text = DIGIT_LETTER.replace_all(&text, "$1 $2");
    let text = WHITESPACE.replace_all(&text, " ");

    text.lines()
        .map(str::trim)
        .filter(|line| line.chars().count() >= MIN_LINE_CHARS)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_glued_words() {
        let out = normalize("the quick brownFox jumped over the lazy dog");
        assert_eq!(out, "the quick brown Fox jumped over the lazy dog");
    }

    #[test]
    fn separates_letters_and_digits() {
        let out = normalize("Revenue grew 12percent in Q3 of fiscal2024 overall");
        assert_eq!(out, "Revenue grew 12 percent in Q 3 of fiscal 2024 overall");
    }

    #[test]
    fn collapses_whitespace_runs() {
        let out = normalize("words   separated \t by\u{a0} odd   spacing here");
        assert_eq!(out, "words separated by odd spacing here");
    }

    #[test]
    fn hard_wrapped_lines_are_joined_not_dropped() {
        let raw = "The great river flows steadily east toward the\n\
                   Atlantic Ocean.\n\
                   A second paragraph begins here and keeps going.";
        assert_eq!(
            normalize(raw),
            "The great river flows steadily east toward the Atlantic Ocean. \
             A second paragraph begins here and keeps going."
        );
    }

    #[test]
    fn page_fragments_survive_inside_longer_text() {
        let raw = "Annual Report\n12\n\nThis line is long enough to be kept.";
        assert_eq!(normalize(raw), "Annual Report 12 This line is long enough to be kept.");
    }

    #[test]
    fn short_text_is_noise() {
        assert_eq!(normalize("Hi."), "");
        assert_eq!(normalize("  page\n\n12  "), "");
    }

    #[test]
    fn keeps_line_of_exactly_minimum_length() {
        let line = "a".repeat(MIN_LINE_CHARS);
        assert_eq!(normalize(&line), line);
        assert_eq!(normalize(&"a".repeat(MIN_LINE_CHARS - 1)), "");
    }

    #[test]
    fn handles_crlf() {
        let out = normalize("first line that is long enough\r\nsecond line that is long enough\r\n");
        assert_eq!(out, "first line that is long enough second line that is long enough");
    }

    #[test]
    fn output_has_no_double_spaces() {
        let raw = "  leading   spaces on this long line \n\n\n   trailing    spaces on this one too   ";
        let out = normalize(raw);
        assert!(!out.contains("  "));
        assert!(!out.starts_with(' ') && !out.ends_with(' '));
    }

    #[test]
    fn idempotent() {
        let samples = [
            "",
            "short",
            "PDFText withGluedWords and page12Numbers mixed2gether.\nTiny\n  Second  line   of   content goes here. ",
            "x1y2z3 a1b2c3 d4e5f6 long enough line\n1a2b3c4d5e6f7g8h9i0j",
            "Mixed ÜnicodeWords and ASCII wordsHere in one line\u{2003}with em-space",
            "multi\n\nline\n\n\ntext where each line is very short",
        ];
        for raw in samples {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
        }
    }
}
