//! Recipe generation providers

pub mod google;
pub mod mock;

use crate::config::GenerationConfig;
use crate::error::Result;
use async_trait::async_trait;
use plateful_core::{Recipe, RecipeRequest};

pub use google::GoogleProvider;
pub use mock::MockProvider;

/// Trait for recipe generation backends
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Provider name
    fn name(&self) -> &'static str;

    /// Whether a credential is configured (always true for providers
    /// that need none)
    fn has_api_key(&self) -> bool;

    /// Install or replace the provider credential
    fn set_api_key(&self, key: String);

    /// Generate recipes for a request
    async fn generate(
        &self,
        request: &RecipeRequest,
        config: &GenerationConfig,
    ) -> Result<Vec<Recipe>>;
}
