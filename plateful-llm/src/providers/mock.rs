//! Offline recipe fabrication for development and tests
//!
//! Produces plausible recipes from the request alone, no network or
//! credential required.

use crate::config::GenerationConfig;
use crate::error::Result;
use crate::images::ImagePicker;
use crate::providers::RecipeProvider;
use async_trait::async_trait;
use plateful_core::{NutritionalInfo, Recipe, RecipeRequest};
use rand::Rng;

struct Cuisine {
    key: &'static str,
    prefix: &'static str,
    dishes: &'static [&'static str],
}

const CUISINES: &[Cuisine] = &[
    Cuisine {
        key: "italian",
        prefix: "Italian",
        dishes: &["Pasta", "Risotto", "Pizza", "Lasagna", "Bruschetta"],
    },
    Cuisine {
        key: "chinese",
        prefix: "Chinese",
        dishes: &["Stir-Fry", "Dumplings", "Noodles", "Fried Rice", "Spring Rolls"],
    },
    Cuisine {
        key: "indian",
        prefix: "Indian",
        dishes: &["Curry", "Tikka Masala", "Biryani", "Saag", "Chana Masala"],
    },
    Cuisine {
        key: "mexican",
        prefix: "Mexican",
        dishes: &["Tacos", "Enchiladas", "Quesadilla", "Burrito", "Guacamole"],
    },
    Cuisine {
        key: "mediterranean",
        prefix: "Mediterranean",
        dishes: &["Hummus", "Falafel", "Greek Salad", "Kebabs", "Tabbouleh"],
    },
    Cuisine {
        key: "japanese",
        prefix: "Japanese",
        dishes: &["Sushi", "Ramen", "Teriyaki", "Miso Soup", "Tempura"],
    },
    Cuisine {
        key: "american",
        prefix: "American",
        dishes: &["Burger", "Mac and Cheese", "BBQ Ribs", "Fried Chicken", "Chili"],
    },
];

const PANTRY_STAPLES: &[&str] = &["olive oil", "salt", "black pepper", "garlic", "onion"];

pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }

    fn cuisine_for(cuisine_type: &str) -> &'static Cuisine {
        let lower = cuisine_type.to_lowercase();
        CUISINES
            .iter()
            .find(|c| lower.contains(c.key))
            .unwrap_or(&CUISINES[0])
    }

    fn fabricate(request: &RecipeRequest, index: usize) -> Recipe {
        let mut rng = rand::thread_rng();
        let cuisine = Self::cuisine_for(&request.cuisine_type);

        // Rotate through dishes so multiple recipes in one batch differ
        let dish = cuisine.dishes[index % cuisine.dishes.len()];

        let diet_prefix = request
            .dietary_preference
            .as_deref()
            .map(|p| format!("{} ", p))
            .unwrap_or_default();

        let mut title = format!("{}{} {}", diet_prefix, cuisine.prefix, dish);
        if let Some(main) = request.ingredients.first().filter(|i| !i.trim().is_empty()) {
            title.push_str(&format!(" with {}", main));
        }

        let mut ingredients: Vec<String> = request
            .ingredients
            .iter()
            .take(5)
            .cloned()
            .collect();
        ingredients.extend(PANTRY_STAPLES.iter().map(|s| s.to_string()));

        let main_ingredient = request
            .ingredients
            .first()
            .cloned()
            .unwrap_or_else(|| "main ingredients".to_string());

        let instructions = vec![
            "Prepare all ingredients by washing and chopping them into appropriate sizes."
                .to_string(),
            "Heat olive oil in a large pan over medium heat.".to_string(),
            "Add onions and garlic, sauté until translucent.".to_string(),
            format!("Add {} and cook for 5 minutes.", main_ingredient),
            "Season with salt and pepper to taste.".to_string(),
            "Cover and simmer for 15 minutes.".to_string(),
            "Garnish and serve hot.".to_string(),
        ];

        Recipe {
            image_url: Some(ImagePicker::fallback_image(&title).to_string()),
            preparation_time: Some(format!("{} minutes", rng.gen_range(15..45))),
            servings: Some(rng.gen_range(2..6)),
            dietary_preference: request.dietary_preference.clone(),
            nutritional_info: Some(NutritionalInfo {
                calories: rng.gen_range(200..700),
                protein: rng.gen_range(10..40),
                carbs: rng.gen_range(20..60),
                fat: rng.gen_range(5..25),
            }),
            title,
            ingredients,
            instructions,
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecipeProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn has_api_key(&self) -> bool {
        true
    }

    fn set_api_key(&self, _key: String) {}

    async fn generate(
        &self,
        request: &RecipeRequest,
        config: &GenerationConfig,
    ) -> Result<Vec<Recipe>> {
        Ok((0..config.recipe_count as usize)
            .map(|i| Self::fabricate(request, i))
            .collect())
    }
}
