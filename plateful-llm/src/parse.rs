//! Tolerant parsing of model completions into recipes
//!
//! Models wrap their JSON in markdown fences or prose despite being
//! told not to, and routinely drop fields. Extraction peels the text
//! down to the outermost JSON array; every field beyond the array
//! structure itself is defaultable and never fails the parse.

use crate::error::{RecipeError, Result};
use plateful_core::{NutritionalInfo, Recipe};
use serde_json::Value;

const DEFAULT_TITLE: &str = "Untitled Recipe";
const DEFAULT_PREP_TIME: &str = "30 minutes";
const DEFAULT_SERVINGS: u32 = 4;

/// Parse a model completion into recipes
pub fn parse_recipes(text: &str) -> Result<Vec<Recipe>> {
    let json = extract_json_array(text).ok_or_else(|| {
        RecipeError::InvalidResponse("No JSON array found in model output".to_string())
    })?;

    let values: Vec<Value> = serde_json::from_str(json)
        .map_err(|e| RecipeError::InvalidResponse(format!("Malformed recipe JSON: {}", e)))?;

    Ok(values.iter().map(recipe_from_value).collect())
}

/// Locate the outermost JSON array in a completion, stripping markdown
/// code fences and surrounding prose.
pub fn extract_json_array(text: &str) -> Option<&str> {
    let inner = match text.find("```") {
        Some(open) => {
            let after_fence = &text[open + 3..];
            // Skip an optional language tag like "json"
            let body_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
            let body = &after_fence[body_start..];
            match body.find("```") {
                Some(close) => &body[..close],
                None => body,
            }
        }
        None => text,
    };

    let start = inner.find('[')?;
    let end = inner.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&inner[start..=end])
}

fn recipe_from_value(value: &Value) -> Recipe {
    Recipe {
        title: non_empty_str(value, "title")
            .unwrap_or(DEFAULT_TITLE)
            .to_string(),
        ingredients: string_list(value, "ingredients"),
        instructions: string_list(value, "instructions"),
        image_url: non_empty_str(value, "imageUrl").map(str::to_string),
        preparation_time: Some(
            non_empty_str(value, "preparationTime")
                .unwrap_or(DEFAULT_PREP_TIME)
                .to_string(),
        ),
        servings: Some(
            value
                .get("servings")
                .and_then(Value::as_u64)
                .and_then(|s| u32::try_from(s).ok())
                .unwrap_or(DEFAULT_SERVINGS),
        ),
        dietary_preference: non_empty_str(value, "dietaryPreference").map(str::to_string),
        nutritional_info: Some(nutrition_from_value(value.get("nutritionalInfo"))),
    }
}

fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn string_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn nutrition_from_value(value: Option<&Value>) -> NutritionalInfo {
    let number = |key: &str| {
        value
            .and_then(|v| v.get(key))
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0)
    };

    NutritionalInfo {
        calories: number("calories"),
        protein: number("protein"),
        carbs: number("carbs"),
        fat: number("fat"),
    }
}
