use crate::config::GenerationConfig;
use crate::error::{RecipeError, Result};
use crate::parse;
use crate::prompt;
use crate::providers::RecipeProvider;
use async_trait::async_trait;
use parking_lot::RwLock;
use plateful_core::{Recipe, RecipeRequest};
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

pub struct GoogleProvider {
    api_key: Arc<RwLock<Option<String>>>,
    client: Client,
    base_url: String,
}

impl GoogleProvider {
    pub fn new() -> Self {
        Self {
            api_key: Arc::new(RwLock::new(None)),
            client: Client::new(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }

    pub fn with_api_key(api_key: String) -> Self {
        let provider = Self::new();
        provider.set_api_key(api_key);
        provider
    }

    fn get_api_key(&self) -> Result<String> {
        self.api_key
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| RecipeError::MissingApiKey("Google".to_string()))
    }
}

impl Default for GoogleProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecipeProvider for GoogleProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    fn has_api_key(&self) -> bool {
        self.api_key.read().is_some()
    }

    fn set_api_key(&self, key: String) {
        *self.api_key.write() = Some(key);
    }

    async fn generate(
        &self,
        request: &RecipeRequest,
        config: &GenerationConfig,
    ) -> Result<Vec<Recipe>> {
        let api_key = self.get_api_key()?;

        let prompt = prompt::build_prompt(request, config.recipe_count);

        let body = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": config.temperature.clamp(0.0, 2.0),
                "topK": config.top_k,
                "topP": config.top_p,
                "maxOutputTokens": config.max_output_tokens.min(8192),
            }
        });

        // Validate base_url to prevent SSRF
        if !self.base_url.starts_with("https://") {
            return Err(RecipeError::InvalidResponse("Invalid base URL".to_string()));
        }

        // URL encode model name to prevent injection
        let model_encoded = urlencoding::encode(&config.model);
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model_encoded, api_key
        );

        debug!(model = %config.model, "Requesting recipe completion");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(RecipeError::InvalidResponse(format!(
                "HTTP {}: {}",
                status, text
            )));
        }

        let json: serde_json::Value = response.json().await?;

        let content = json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or("");

        if content.is_empty() {
            return Err(RecipeError::InvalidResponse(
                "Empty completion from model".to_string(),
            ));
        }

        parse::parse_recipes(content)
    }
}
