//! Scripted models for pipeline tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use synopsis_llm::{LengthParams, LlmError, SummaryModel};

/// What a [`ScriptedModel`] does on every call.
#[derive(Clone)]
pub enum Script {
    /// Return the first `n` words of the input.
    FirstWords(usize),
    /// Return this exact text.
    Fixed(String),
    /// Fail with an API error.
    Fail,
}

#[derive(Clone)]
pub struct ScriptedModel {
    script: Script,
    limit: Option<usize>,
    calls: Arc<AtomicUsize>,
    seen: Arc<std::sync::Mutex<Vec<(String, LengthParams)>>>,
}

impl ScriptedModel {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            limit: None,
            calls: Arc::new(AtomicUsize::new(0)),
            seen: Arc::default(),
        }
    }

    pub fn with_char_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<(String, LengthParams)> {
        self.seen.lock().unwrap().clone()
    }

    pub fn boxed(&self) -> Box<dyn SummaryModel> {
        Box::new(self.clone())
    }
}

#[async_trait]
impl SummaryModel for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    fn input_char_limit(&self) -> Option<usize> {
        self.limit
    }

    async fn summarize(&self, text: &str, params: LengthParams) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push((text.to_string(), params));
        match &self.script {
            Script::FirstWords(n) => Ok(text.split_whitespace().take(*n).collect::<Vec<_>>().join(" ")),
            Script::Fixed(out) => Ok(out.clone()),
            Script::Fail => Err(LlmError::ApiError {
                status: 503,
                body: "model loading".into(),
            }),
        }
    }
}

/// A document long enough to chunk, about rivers and their ecology.
pub fn river_document() -> String {
    [
        "The Amazon River carries more water than any other river on the planet.",
        "Rainforest ecology along the river depends on seasonal flooding cycles.",
        "Scientists measure river discharge at monitoring stations near Manaus.",
        "Seasonal flooding spreads nutrients across the surrounding floodplain forests.",
        "Fishermen along the Amazon River follow the migration of large catfish.",
        "Deforestation upstream changes how sediment reaches the river delta.",
        "Researchers publish discharge measurements every year for public review.",
        "The floodplain forests shelter hundreds of species found nowhere else.",
        "River dolphins navigate the flooded forests during the rainy months.",
        "Conservation groups track deforestation with satellite imagery every week.",
        "Local communities rely on the river for transport between distant villages.",
        "The Amazon River basin covers a large share of the South American continent.",
    ]
    .join(" ")
}

/// Hands out a clone of one scripted model, or reports none configured.
pub struct StaticModels(pub Option<ScriptedModel>);

impl crate::pipeline::ModelSource for StaticModels {
    fn model_for(
        &self,
        _selection: synopsis_core::ModelSelection,
        _config: &synopsis_core::config::Config,
    ) -> Result<Box<dyn SummaryModel>, LlmError> {
        match &self.0 {
            Some(model) => Ok(model.boxed()),
            None => Err(LlmError::NotConfigured("no model in this test".into())),
        }
    }
}
