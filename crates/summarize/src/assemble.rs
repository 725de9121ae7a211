//! Renders the final summary document.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;
use synopsis_core::{DetailTier, ModelSelection};
use synopsis_ingest::split_sentences;

const SENTENCES_PER_SECTION: usize = 3;
const MAX_SECTIONS: usize = 8;
const EMPTY_SUMMARY: &str = "Unable to generate summary from the provided document.";

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));
static MISSING_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("boundary regex is valid"));
static AFTER_TERMINATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.!?])\s*([A-Z])").expect("terminator spacing regex is valid"));

/// Everything the header and footer need besides the summary itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub selection: ModelSelection,
    /// Model that produced the summary; `None` when only extraction ran.
    pub model_name: Option<&'a str>,
    pub tier: DetailTier,
    pub source_filename: Option<&'a str>,
    pub fallback_used: bool,
}

impl RenderContext<'_> {
    fn header_label(&self) -> String {
        let mode = match self.selection {
            ModelSelection::Offline => "OFFLINE",
            ModelSelection::Online => "ONLINE",
        };
        match self.model_name {
            Some(name) => format!("{mode} ({})", name.to_uppercase()),
            None => format!("{mode} (EXTRACTIVE)"),
        }
    }

    fn mode_text(&self) -> String {
        match (self.selection, self.model_name) {
            (ModelSelection::Offline, Some(name)) => format!("offline model {name} (local inference)"),
            (ModelSelection::Online, Some(name)) => format!("online model {name} (remote inference API)"),
            (_, None) => "extractive summarization (no model available)".to_string(),
        }
    }
}

pub fn assemble(summary: &str, key_topics: &[String], ctx: &RenderContext<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "AI DOCUMENT SUMMARY - {}", ctx.header_label());
    let _ = writeln!(out, "{}", "=".repeat(60));
    out.push('\n');

    if let Some(name) = ctx.source_filename.filter(|n| !n.is_empty()) {
        let _ = writeln!(out, "SOURCE DOCUMENT: {name}");
        out.push('\n');
    }

    if !key_topics.is_empty() {
        out.push_str("KEY TOPICS:\n");
        for topic in key_topics {
            let _ = writeln!(out, "  • {topic}");
        }
        out.push('\n');
    }

    let _ = writeln!(out, "{}", ctx.tier.label());
    out.push('\n');
    out.push_str("SUMMARY:\n\n");

    let sections = sections(summary);
    if sections.is_empty() {
        let _ = writeln!(out, "{EMPTY_SUMMARY}");
        out.push('\n');
    } else {
        for (i, section) in sections.iter().enumerate() {
            let _ = writeln!(out, "{}. {section}", i + 1);
            out.push('\n');
        }
    }

    let _ = writeln!(out, "{}", "-".repeat(50));
    let _ = write!(out, "Generated using {}", ctx.mode_text());
    if ctx.fallback_used {
        out.push_str("\nSome passes used extractive summarization.");
    }
    out
}

/// Three sentences per section, at most eight sections.
fn sections(summary: &str) -> Vec<String> {
    let summary = summary.trim();
    if summary.is_empty() {
        return Vec::new();
    }
    let sentences = split_sentences(summary);
    if sentences.is_empty() {
        return vec![clean_section(summary)];
    }
    sentences
        .chunks(SENTENCES_PER_SECTION)
        .take(MAX_SECTIONS)
        .map(|group| clean_section(&group.join(" ")))
        .collect()
}

fn clean_section(text: &str) -> String {
    let text = WHITESPACE.replace_all(text.trim(), " ");
    let text = MISSING_BOUNDARY.replace_all(&text, "$1. $2");
    let text = AFTER_TERMINATOR.replace_all(&text, "$1 $2");

    let mut chars = text.chars();
    let mut cleaned: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => return String::new(),
    };
    if !cleaned.ends_with(['.', '!', '?']) {
        cleaned.push('.');
    }
    cleaned
}
