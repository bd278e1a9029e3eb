//! Shared domain types for recipe generation
//!
//! Field names are camelCase on the wire so the JSON matches what the
//! generation providers emit and what web clients expect.

use serde::{Deserialize, Serialize};

/// A generated recipe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preparation_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_preference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutritional_info: Option<NutritionalInfo>,
}

/// Per-serving nutrition estimate
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NutritionalInfo {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

/// What the user wants cooked
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    pub ingredients: Vec<String>,
    pub allergies: Vec<String>,
    pub cuisine_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_preference: Option<String>,
}

impl RecipeRequest {
    /// Validate the request before handing it to a provider
    pub fn validate(&self) -> Result<(), String> {
        if self.ingredients.iter().all(|i| i.trim().is_empty()) {
            return Err("At least one ingredient is required".to_string());
        }

        if self.ingredients.len() > 100 {
            return Err("Too many ingredients (max 100)".to_string());
        }

        if self.allergies.len() > 100 {
            return Err("Too many allergies (max 100)".to_string());
        }

        if self.cuisine_type.len() > 128 {
            return Err("Cuisine type too long (max 128 chars)".to_string());
        }

        if let Some(ref pref) = self.dietary_preference {
            if pref.len() > 128 {
                return Err("Dietary preference too long (max 128 chars)".to_string());
            }
        }

        Ok(())
    }
}

/// Response envelope for a generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub recipes: Vec<Recipe>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RecipeResponse {
    pub fn ok(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes,
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            recipes: Vec::new(),
            success: false,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RecipeRequest {
        RecipeRequest {
            ingredients: vec!["tomato".to_string(), "basil".to_string()],
            allergies: vec![],
            cuisine_type: "italian".to_string(),
            dietary_preference: None,
        }
    }

    #[test]
    fn test_request_validation() {
        assert!(request().validate().is_ok());

        let mut empty = request();
        empty.ingredients = vec!["  ".to_string()];
        assert!(empty.validate().is_err());

        let mut long = request();
        long.cuisine_type = "a".repeat(200);
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_recipe_wire_format_is_camel_case() {
        let recipe = Recipe {
            title: "Pasta".to_string(),
            ingredients: vec!["pasta".to_string()],
            instructions: vec!["boil".to_string()],
            image_url: Some("https://example.com/p.jpg".to_string()),
            preparation_time: Some("20 minutes".to_string()),
            servings: Some(2),
            dietary_preference: None,
            nutritional_info: Some(NutritionalInfo {
                calories: 400,
                protein: 12,
                carbs: 60,
                fat: 8,
            }),
        };

        let json = serde_json::to_string(&recipe).unwrap();
        assert!(json.contains("\"imageUrl\""));
        assert!(json.contains("\"preparationTime\""));
        assert!(json.contains("\"nutritionalInfo\""));
        assert!(!json.contains("dietaryPreference"));
    }

    #[test]
    fn test_recipe_request_round_trip() {
        let req = request();
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"cuisineType\""));
        let back: RecipeRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, req);
    }

    #[test]
    fn test_response_envelope() {
        let ok = RecipeResponse::ok(vec![]);
        assert!(ok.success);
        assert!(ok.error.is_none());

        let failed = RecipeResponse::failed("boom");
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("boom"));
    }
}
