use serde::{Deserialize, Serialize};

/// Recipe generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Which provider produces recipes
    pub provider: Provider,

    /// Model identifier for API-backed providers
    pub model: String,

    /// Sampling temperature (0.0-2.0)
    pub temperature: f32,

    /// Top-k sampling
    pub top_k: u32,

    /// Nucleus sampling (0.0-1.0)
    pub top_p: f32,

    /// Completion token budget
    pub max_output_tokens: u32,

    /// How many recipes to ask for per request
    pub recipe_count: u32,

    /// Optional Unsplash access key for recipe photo search; without it
    /// recipes fall back to stock food images
    pub unsplash_access_key: Option<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Google,
            model: "gemini-pro".to_string(),
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 2048,
            recipe_count: 3,
            unsplash_access_key: None,
        }
    }
}

impl GenerationConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.is_empty() {
            return Err("Model name cannot be empty".to_string());
        }

        if self.model.len() > 256 {
            return Err("Model name too long (max 256 chars)".to_string());
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("Temperature must be between 0.0 and 2.0".to_string());
        }

        if !(0.0..=1.0).contains(&self.top_p) {
            return Err("Top-p must be between 0.0 and 1.0".to_string());
        }

        if self.max_output_tokens == 0 || self.max_output_tokens > 8192 {
            return Err("Max output tokens must be between 1 and 8192".to_string());
        }

        if self.recipe_count == 0 || self.recipe_count > 10 {
            return Err("Recipe count must be between 1 and 10".to_string());
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    Google,
    Mock,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Mock => "mock",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "google" | "gemini" => Some(Provider::Google),
            "mock" => Some(Provider::Mock),
            _ => None,
        }
    }

    /// Environment variable holding the provider credential, if any
    pub fn env_var_name(&self) -> Option<&'static str> {
        match self {
            Provider::Google => Some("GEMINI_API_KEY"),
            Provider::Mock => None,
        }
    }
}
