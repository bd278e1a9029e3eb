//! plateful-llm: AI recipe generation
//!
//! Turns a recipe request (ingredients, allergies, cuisine, dietary
//! preference) into recipe objects through a generative-text provider,
//! with tolerant response parsing and fallback image selection.

pub mod config;
pub mod error;
pub mod generator;
pub mod images;
pub mod parse;
pub mod prompt;
pub mod providers;

pub use config::{GenerationConfig, Provider};
pub use error::{RecipeError, Result};
pub use generator::RecipeGenerator;
pub use images::ImagePicker;
pub use providers::RecipeProvider;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_enum() {
        assert_eq!(Provider::Google.as_str(), "google");
        assert_eq!(Provider::Mock.as_str(), "mock");
        assert_eq!(Provider::Google.env_var_name(), Some("GEMINI_API_KEY"));
        assert_eq!(Provider::Mock.env_var_name(), None);
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!(Provider::from_str("google"), Some(Provider::Google));
        assert_eq!(Provider::from_str("gemini"), Some(Provider::Google));
        assert_eq!(Provider::from_str("MOCK"), Some(Provider::Mock));
        assert_eq!(Provider::from_str("invalid"), None);
    }

    #[test]
    fn test_generation_config_default() {
        let config = GenerationConfig::default();
        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.top_k, 40);
        assert_eq!(config.top_p, 0.95);
        assert_eq!(config.max_output_tokens, 2048);
        assert_eq!(config.recipe_count, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generation_config_validation() {
        let mut config = GenerationConfig::default();

        config.temperature = 3.0;
        assert!(config.validate().is_err());
        config.temperature = 0.7;

        config.recipe_count = 0;
        assert!(config.validate().is_err());
        config.recipe_count = 50;
        assert!(config.validate().is_err());
        config.recipe_count = 3;

        config.model = String::new();
        assert!(config.validate().is_err());
    }
}
