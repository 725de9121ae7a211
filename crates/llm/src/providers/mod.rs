pub mod huggingface;
pub mod ollama;

use std::time::Duration;

use synopsis_core::config::Config;
use synopsis_core::ModelSelection;

use crate::provider::{LlmError, SummaryModel};

/// Create the summarization backend for the selected mode.
pub fn create_model(
    selection: ModelSelection,
    config: &Config,
) -> Result<Box<dyn SummaryModel>, LlmError> {
    match selection {
        ModelSelection::Offline => {
            let offline = &config.offline;
            if offline.url.trim().is_empty() {
                return Err(LlmError::NotConfigured("OLLAMA_URL is empty".into()));
            }
            Ok(Box::new(ollama::OllamaProvider::new(
                offline.url.clone(),
                offline.model.clone(),
                Duration::from_secs(offline.timeout_secs),
            )?))
        }
        ModelSelection::Online => {
            let online = &config.online;
            let api_token = online
                .api_token
                .as_ref()
                .ok_or_else(|| LlmError::NotConfigured("HF_API_TOKEN not set".into()))?;
            Ok(Box::new(huggingface::HuggingFaceProvider::new(
                api_token.clone(),
                online.model.clone(),
                online.base_url.clone(),
                Duration::from_secs(online.timeout_secs),
                online.privacy_char_limit,
            )?))
        }
    }
}
