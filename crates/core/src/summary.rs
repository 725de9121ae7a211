use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoreError;

// ── Detail control ────────────────────────────────────────────

/// Requested share of the source to keep, in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DetailRatio(f64);

impl DetailRatio {
    pub fn new(ratio: f64) -> Result<Self, CoreError> {
        if ratio.is_finite() && ratio > 0.0 && ratio <= 1.0 {
            Ok(Self(ratio))
        } else {
            Err(CoreError::InvalidDetailRatio(ratio))
        }
    }

    /// "Key points only" preset.
    pub const fn low() -> Self {
        Self(0.2)
    }

    /// "Balanced overview" preset.
    pub const fn medium() -> Self {
        Self(0.4)
    }

    /// "Comprehensive analysis" preset.
    pub const fn high() -> Self {
        Self(0.7)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn tier(self) -> DetailTier {
        if self.0 <= 0.3 {
            DetailTier::Low
        } else if self.0 <= 0.6 {
            DetailTier::Medium
        } else {
            DetailTier::High
        }
    }
}

impl Default for DetailRatio {
    fn default() -> Self {
        Self::medium()
    }
}

impl TryFrom<f64> for DetailRatio {
    type Error = CoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DetailRatio> for f64 {
    fn from(ratio: DetailRatio) -> Self {
        ratio.0
    }
}

/// Accepts a preset name (`low`, `medium`, `high`) or a bare ratio (`0.35`).
impl FromStr for DetailRatio {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::low()),
            "medium" => Ok(Self::medium()),
            "high" => Ok(Self::high()),
            other => other
                .parse::<f64>()
                .map_err(|_| CoreError::UnknownDetailLevel(s.to_string()))
                .and_then(Self::new),
        }
    }
}

/// Discrete detail level used for model token budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailTier {
    Low,
    Medium,
    High,
}

impl DetailTier {
    /// Fraction of the input word count a model summary should aim for.
    pub fn target_ratio(self) -> f64 {
        match self {
            DetailTier::Low => 0.3,
            DetailTier::Medium => 0.5,
            DetailTier::High => 0.7,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DetailTier::Low => "LOW DETAIL - Key Points Only",
            DetailTier::Medium => "MEDIUM DETAIL - Balanced Overview",
            DetailTier::High => "HIGH DETAIL - Comprehensive Analysis",
        }
    }
}

// ── Model selection ───────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSelection {
    /// Local inference server.
    #[default]
    Offline,
    /// Remote inference API.
    Online,
}

impl ModelSelection {
    pub fn as_str(self) -> &'static str {
        match self {
            ModelSelection::Offline => "offline",
            ModelSelection::Online => "online",
        }
    }
}

impl std::fmt::Display for ModelSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelSelection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "offline" | "local" => Ok(ModelSelection::Offline),
            "online" | "remote" => Ok(ModelSelection::Online),
            _ => Err(CoreError::UnknownModelSelection(s.to_string())),
        }
    }
}

// ── Result record ─────────────────────────────────────────────

/// Final output for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    /// Rendered, structured summary document.
    pub summary_text: String,
    pub original_words: usize,
    pub summary_words: usize,
    /// Percentage word reduction, always within `[0, 100]`.
    pub compression_ratio: f64,
    pub original_sentences: usize,
    pub summary_sentences: usize,
    pub key_topics: Vec<String>,
    pub model_used: ModelSelection,
    pub source_file: String,
    /// Set on the degraded result produced for documents too short to summarize.
    #[serde(default)]
    pub placeholder: bool,
    /// Set when at least one pass fell back to extractive summarization.
    #[serde(default)]
    pub fallback_used: bool,
}
