use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_parse<T: std::str::FromStr>(profile: &str, key: &str, default: T) -> T {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub pipeline: PipelineConfig,
    pub offline: OfflineModelConfig,
    pub online: OnlineModelConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `SYNOPSIS_PROFILE`. When set (e.g. `PROD`), every
    /// key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("SYNOPSIS_PROFILE", "");
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            pipeline: PipelineConfig::from_env_profiled(p),
            offline: OfflineModelConfig::from_env_profiled(p),
            online: OnlineModelConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  pipeline:  max_chunk_length={}, min_document_chars={}, recombine_word_limit={}, top_topics={}",
            self.pipeline.max_chunk_length,
            self.pipeline.min_document_chars,
            self.pipeline.recombine_word_limit,
            self.pipeline.top_topics
        );
        tracing::info!("  offline:   url={}, model={}", self.offline.url, self.offline.model);
        tracing::info!(
            "  online:    model={}, token={}, timeout={}s, privacy_char_limit={}",
            self.online.model,
            if self.online.is_configured() { "set" } else { "(none)" },
            self.online.timeout_secs,
            self.online.privacy_char_limit
        );
    }

    /// Return a redacted view safe for printing (no secrets).
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "pipeline": self.pipeline,
            "offline": { "url": self.offline.url, "model": self.offline.model },
            "online": {
                "base_url": self.online.base_url,
                "model": self.online.model,
                "configured": self.online.is_configured(),
                "timeout_secs": self.online.timeout_secs,
                "privacy_char_limit": self.online.privacy_char_limit,
            },
        })
    }
}

// ── Pipeline ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Upper bound on chunk length in characters.
    pub max_chunk_length: usize,
    /// Normalized text shorter than this yields the placeholder result.
    pub min_document_chars: usize,
    /// Combined chunk summaries above this word count get one more pass.
    pub recombine_word_limit: usize,
    /// Number of key topics to report.
    pub top_topics: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_chunk_length: 800,
            min_document_chars: 100,
            recombine_word_limit: 500,
            top_topics: 6,
        }
    }
}

impl PipelineConfig {
    fn from_env_profiled(p: &str) -> Self {
        let d = Self::default();
        Self {
            max_chunk_length: profiled_env_parse(p, "MAX_CHUNK_LENGTH", d.max_chunk_length),
            min_document_chars: profiled_env_parse(p, "MIN_DOCUMENT_CHARS", d.min_document_chars),
            recombine_word_limit: profiled_env_parse(
                p,
                "RECOMBINE_WORD_LIMIT",
                d.recombine_word_limit,
            ),
            top_topics: profiled_env_parse(p, "TOP_TOPICS", d.top_topics),
        }
    }
}

// ── Offline (local inference server) ──────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfflineModelConfig {
    pub url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for OfflineModelConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:11434".to_string(),
            model: "llama3.2".to_string(),
            timeout_secs: 120,
        }
    }
}

impl OfflineModelConfig {
    fn from_env_profiled(p: &str) -> Self {
        let d = Self::default();
        Self {
            url: profiled_env_or(p, "OLLAMA_URL", &d.url),
            model: profiled_env_or(p, "OLLAMA_MODEL", &d.model),
            timeout_secs: profiled_env_parse(p, "OLLAMA_TIMEOUT_SECS", d.timeout_secs),
        }
    }
}

// ── Online (remote inference API) ─────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineModelConfig {
    pub base_url: String,
    pub model: String,
    pub api_token: Option<String>,
    pub timeout_secs: u64,
    /// Text sent to the remote model is cut to this many characters.
    pub privacy_char_limit: usize,
}

impl Default for OnlineModelConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api-inference.huggingface.co".to_string(),
            model: "facebook/bart-large-cnn".to_string(),
            api_token: None,
            timeout_secs: 30,
            privacy_char_limit: 1000,
        }
    }
}

impl OnlineModelConfig {
    fn from_env_profiled(p: &str) -> Self {
        let d = Self::default();
        Self {
            base_url: profiled_env_or(p, "HF_API_URL", &d.base_url),
            model: profiled_env_or(p, "HF_MODEL", &d.model),
            api_token: profiled_env_opt(p, "HF_API_TOKEN"),
            timeout_secs: profiled_env_parse(p, "HF_TIMEOUT_SECS", d.timeout_secs),
            privacy_char_limit: profiled_env_parse(
                p,
                "HF_PRIVACY_CHAR_LIMIT",
                d.privacy_char_limit,
            ),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_token.is_some()
    }
}
