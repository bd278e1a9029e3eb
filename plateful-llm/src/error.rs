use plateful_core::Error as CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("API key not set for provider: {0}")]
    MissingApiKey(String),

    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid response from provider: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RecipeError>;

impl From<RecipeError> for CoreError {
    fn from(err: RecipeError) -> Self {
        CoreError::Generation(err.to_string())
    }
}
