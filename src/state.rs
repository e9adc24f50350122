// src/state.rs
use std::sync::Arc;

use crate::config::{DEFAULT_MODEL, GeminiConfig};
use crate::services::gemini::{GeminiClient, LlmClient, LlmError};

pub type SharedState = Arc<AppState>;

/// Built once at startup and only read afterwards.
pub struct AppState {
    pub llm: Option<Arc<dyn LlmClient>>,
    pub model: String,
}

impl AppState {
    pub fn new(llm: Option<Arc<dyn LlmClient>>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }

    /// State with no model backend; `/chat` answers with a configuration error.
    pub fn unconfigured() -> Self {
        Self::new(None, DEFAULT_MODEL)
    }

    /// Creates the Gemini client when an API key is present.
    pub fn from_config(config: &GeminiConfig) -> Result<Self, LlmError> {
        let llm = match &config.api_key {
            Some(key) => {
                let client: Arc<dyn LlmClient> = Arc::new(GeminiClient::new(config, key.as_str())?);
                Some(client)
            }
            None => None,
        };
        Ok(Self::new(llm, config.model.clone()))
    }

    pub fn is_configured(&self) -> bool {
        self.llm.is_some()
    }
}
