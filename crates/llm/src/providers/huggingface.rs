//! Hosted inference API (Hugging Face) summarization backend.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::provider::{LengthParams, LlmError, SummaryModel};

pub struct HuggingFaceProvider {
    client: reqwest::Client,
    api_token: String,
    model: String,
    base_url: String,
    privacy_char_limit: usize,
}

impl HuggingFaceProvider {
    pub fn new(
        api_token: String,
        model: String,
        base_url: String,
        timeout: Duration,
        privacy_char_limit: usize,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(timeout).build()?,
            api_token,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            privacy_char_limit,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}", self.base_url, self.model)
    }
}

/// Request body. Server-side caching is disabled so submitted text is not retained.
pub(crate) fn build_payload(text: &str, params: LengthParams) -> Value {
    json!({
        "inputs": text,
        "parameters": {
            "max_length": params.max_length,
            "min_length": params.min_length,
            "do_sample": false,
        },
        "options": {
            "wait_for_model": true,
            "use_cache": false,
        },
    })
}

/// Successful responses look like `[{"summary_text": "..."}]`; failures carry `{"error": "..."}`.
pub(crate) fn parse_response(resp: &Value) -> Result<String, LlmError> {
    if let Some(err) = resp.get("error").and_then(Value::as_str) {
        return Err(LlmError::ParseError(format!("inference API reported: {err}")));
    }
    resp[0]["summary_text"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| LlmError::ParseError("missing [0].summary_text".into()))
}

#[async_trait]
impl SummaryModel for HuggingFaceProvider {
    fn name(&self) -> &str {
        &self.model
    }

    fn input_char_limit(&self) -> Option<usize> {
        Some(self.privacy_char_limit)
    }

    async fn summarize(&self, text: &str, params: LengthParams) -> Result<String, LlmError> {
        let url = self.endpoint();
        debug!(
            "Inference API request to {} ({} chars, max_length={})",
            url,
            text.chars().count(),
            params.max_length
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .header("Content-Type", "application/json")
            .json(&build_payload(text, params))
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError { status, body });
        }

        let resp: Value = response.json().await?;
        parse_response(&resp)
    }
}
