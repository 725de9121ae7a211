//! Local inference server (Ollama) summarization backend.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::provider::{LengthParams, LlmError, SummaryModel};

pub struct OllamaProvider {
    client: reqwest::Client,
    url: String,
    model: String,
}

impl OllamaProvider {
    pub fn new(url: String, model: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(timeout).build()?,
            url: url.trim_end_matches('/').to_string(),
            model,
        })
    }
}

pub(crate) fn build_request(model: &str, text: &str, params: LengthParams) -> Value {
    json!({
        "model": model,
        "system": format!(
            "You are a summarization model. Reply with a summary of the user's text \
             of at least {} and at most {} words, and nothing else.",
            params.min_length, params.max_length
        ),
        "prompt": format!("summarize: {text}"),
        "stream": false,
        "options": {
            "temperature": 0.0,
            "num_predict": params.max_length,
        },
    })
}

#[async_trait]
impl SummaryModel for OllamaProvider {
    fn name(&self) -> &str {
        &self.model
    }

    async fn summarize(&self, text: &str, params: LengthParams) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.url);
        debug!("Ollama request to {} (max_length={})", url, params.max_length);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&build_request(&self.model, text, params))
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError { status, body });
        }

        let resp: Value = response.json().await?;
        let content = resp["response"]
            .as_str()
            .ok_or_else(|| LlmError::ParseError("missing response".into()))?
            .to_string();

        Ok(content)
    }
}
