//! Prompt construction for recipe generation

use plateful_core::RecipeRequest;

/// Build the generation prompt for a request.
///
/// The model is instructed to answer with a bare JSON array so the
/// parser has a fighting chance; it frequently ignores that and wraps
/// the payload anyway, which `parse` tolerates.
pub fn build_prompt(request: &RecipeRequest, count: u32) -> String {
    let allergies = if request.allergies.is_empty() {
        "None".to_string()
    } else {
        request.allergies.join(", ")
    };

    let dietary = request
        .dietary_preference
        .as_deref()
        .unwrap_or("None specified");

    format!(
        r#"Generate {count} different detailed recipes with the following requirements:

Available ingredients: {ingredients}

Allergies to avoid: {allergies}

Cuisine type: {cuisine}

Dietary preference: {dietary}

Please format the response as a JSON array with each recipe having the following structure:
{{
  "title": "Recipe Title",
  "ingredients": ["ingredient 1", "ingredient 2"],
  "instructions": ["step 1", "step 2"],
  "preparationTime": "X minutes",
  "servings": X,
  "dietaryPreference": "{dietary_field}",
  "nutritionalInfo": {{
    "calories": X,
    "protein": X,
    "carbs": X,
    "fat": X
  }}
}}

Only respond with the JSON data and nothing else. Do not include any explanations or text outside of the JSON structure."#,
        count = count,
        ingredients = request.ingredients.join(", "),
        allergies = allergies,
        cuisine = request.cuisine_type,
        dietary = dietary,
        dietary_field = request.dietary_preference.as_deref().unwrap_or("standard"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_all_constraints() {
        let request = RecipeRequest {
            ingredients: vec!["chicken".to_string(), "rice".to_string()],
            allergies: vec!["peanuts".to_string()],
            cuisine_type: "indian".to_string(),
            dietary_preference: Some("halal".to_string()),
        };

        let prompt = build_prompt(&request, 3);
        assert!(prompt.contains("3 different detailed recipes"));
        assert!(prompt.contains("chicken, rice"));
        assert!(prompt.contains("peanuts"));
        assert!(prompt.contains("indian"));
        assert!(prompt.contains("halal"));
        assert!(prompt.contains("JSON array"));
    }

    #[test]
    fn test_prompt_defaults_for_empty_fields() {
        let request = RecipeRequest {
            ingredients: vec!["tofu".to_string()],
            allergies: vec![],
            cuisine_type: "japanese".to_string(),
            dietary_preference: None,
        };

        let prompt = build_prompt(&request, 1);
        assert!(prompt.contains("Allergies to avoid: None"));
        assert!(prompt.contains("Dietary preference: None specified"));
        assert!(prompt.contains("\"standard\""));
    }
}
