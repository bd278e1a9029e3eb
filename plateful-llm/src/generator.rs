//! Recipe generation facade

use crate::config::{GenerationConfig, Provider};
use crate::error::{RecipeError, Result};
use crate::images::ImagePicker;
use crate::providers::{GoogleProvider, MockProvider, RecipeProvider};
use plateful_core::{Recipe, RecipeRequest};
use std::sync::Arc;
use tracing::info;

/// Owns a provider and an image picker; the single entry point for
/// turning a request into displayable recipes.
pub struct RecipeGenerator {
    provider: Arc<dyn RecipeProvider>,
    images: ImagePicker,
    config: GenerationConfig,
}

impl RecipeGenerator {
    /// Create a generator for the configured provider, reading the
    /// provider credential from its environment variable when present.
    pub fn new(config: GenerationConfig) -> Result<Self> {
        config.validate().map_err(RecipeError::Config)?;

        let provider: Arc<dyn RecipeProvider> = match config.provider {
            Provider::Google => Arc::new(GoogleProvider::new()),
            Provider::Mock => Arc::new(MockProvider::new()),
        };

        if let Some(var) = config.provider.env_var_name() {
            if let Ok(key) = std::env::var(var) {
                if !key.is_empty() {
                    provider.set_api_key(key);
                }
            }
        }

        Ok(Self::build(config, provider))
    }

    /// Create a generator with an explicit provider (injection seam)
    pub fn with_provider(
        config: GenerationConfig,
        provider: Arc<dyn RecipeProvider>,
    ) -> Result<Self> {
        config.validate().map_err(RecipeError::Config)?;
        Ok(Self::build(config, provider))
    }

    fn build(config: GenerationConfig, provider: Arc<dyn RecipeProvider>) -> Self {
        let images = ImagePicker::new(config.unsplash_access_key.clone());
        Self {
            provider,
            images,
            config,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub fn has_api_key(&self) -> bool {
        self.provider.has_api_key()
    }

    pub fn set_api_key(&self, key: String) {
        self.provider.set_api_key(key);
    }

    /// Generate recipes for a request and attach images.
    ///
    /// Provider failure is returned to the caller; image selection
    /// failures are absorbed per recipe.
    pub async fn generate(&self, request: &RecipeRequest) -> Result<Vec<Recipe>> {
        request
            .validate()
            .map_err(RecipeError::InvalidRequest)?;

        let mut recipes = self.provider.generate(request, &self.config).await?;
        info!(
            count = recipes.len(),
            provider = self.provider.name(),
            "Generated recipes"
        );

        for recipe in &mut recipes {
            if recipe.image_url.is_none() {
                recipe.image_url = Some(self.images.image_for(&recipe.title).await);
            }
        }

        Ok(recipes)
    }
}
