//! Recipe photo selection
//!
//! Generation providers emit text only, so photos come from an image
//! search keyed on the recipe title, with a deterministic stock-photo
//! fallback. Image failures never fail recipe generation.

use crate::error::{RecipeError, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

/// Stock food photography used when no image search is configured or
/// the search comes back empty
pub const FALLBACK_IMAGES: [&str; 5] = [
    "https://images.unsplash.com/photo-1546069901-ba9599a7e63c",
    "https://images.unsplash.com/photo-1565299624946-b28f40a0ae38",
    "https://images.unsplash.com/photo-1567620905732-2d1ec7ab7445",
    "https://images.unsplash.com/photo-1540189549336-e6e99c3679fe",
    "https://images.unsplash.com/photo-1565958011703-44f9829ba187",
];

const SEARCH_URL: &str = "https://api.unsplash.com/search/photos";

/// Picks an image URL for a recipe title
pub struct ImagePicker {
    client: Client,
    access_key: Option<String>,
}

impl ImagePicker {
    pub fn new(access_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            access_key,
        }
    }

    /// Deterministic fallback: the same title always maps to the same
    /// stock photo.
    pub fn fallback_image(title: &str) -> &'static str {
        let hash = title
            .bytes()
            .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
        FALLBACK_IMAGES[hash % FALLBACK_IMAGES.len()]
    }

    /// Best image for a title: search when configured, fallback on any
    /// failure or miss.
    pub async fn image_for(&self, title: &str) -> String {
        if let Some(ref key) = self.access_key {
            match self.search(title, key).await {
                Ok(Some(url)) => return url,
                Ok(None) => debug!("No image search results for '{}'", title),
                Err(e) => warn!("Image search failed for '{}': {}", title, e),
            }
        }
        Self::fallback_image(title).to_string()
    }

    async fn search(&self, title: &str, access_key: &str) -> Result<Option<String>> {
        let query = urlencoding::encode(&format!("{} food", title)).into_owned();
        let url = format!("{}?query={}&per_page=1", SEARCH_URL, query);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Client-ID {}", access_key))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RecipeError::InvalidResponse(format!(
                "Image search returned HTTP {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        Ok(json["results"][0]["urls"]["regular"]
            .as_str()
            .map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_deterministic() {
        let a = ImagePicker::fallback_image("Tomato Basil Pasta");
        let b = ImagePicker::fallback_image("Tomato Basil Pasta");
        assert_eq!(a, b);
        assert!(FALLBACK_IMAGES.contains(&a));
    }

    #[test]
    fn test_different_titles_may_differ() {
        // Not a strict requirement, but the hash should spread across
        // the stock list rather than collapsing to one entry
        let urls: std::collections::HashSet<_> = [
            "Pasta", "Curry", "Tacos", "Sushi", "Burger", "Falafel", "Ramen",
        ]
        .iter()
        .map(|t| ImagePicker::fallback_image(t))
        .collect();
        assert!(urls.len() > 1);
    }

    #[tokio::test]
    async fn test_no_access_key_uses_fallback() {
        let picker = ImagePicker::new(None);
        let url = picker.image_for("Greek Salad").await;
        assert_eq!(url, ImagePicker::fallback_image("Greek Salad"));
    }
}
