// Plateful command line interface
// Generate recipes through a running plateful-server and read them aloud

use clap::{Parser, Subcommand};
use plateful_core::{Recipe, RecipeRequest, RecipeResponse};
use plateful_spk::{NarrationConfig, NarrationController};
use std::time::Duration;
use tracing::debug;

#[derive(Parser)]
#[command(name = "plateful")]
#[command(about = "Plateful - AI recipe generation with read-aloud", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, default_value = "http://localhost:8080", global = true)]
    server: String,

    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate recipes from ingredients
    Generate {
        /// Ingredients you have on hand (repeatable)
        #[arg(long, short, required = true)]
        ingredient: Vec<String>,

        /// Allergies to avoid (repeatable)
        #[arg(long, short)]
        allergy: Vec<String>,

        /// Cuisine type (italian, chinese, indian, ...)
        #[arg(long, short, default_value = "any")]
        cuisine: String,

        /// Dietary preference (vegetarian, vegan, ...)
        #[arg(long, short)]
        diet: Option<String>,

        /// Read the first recipe aloud after printing
        #[arg(long)]
        read_aloud: bool,
    },

    /// Read arbitrary text aloud
    Narrate {
        /// Text to speak
        text: String,
    },

    /// List voices offered by the speech engine
    Voices,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_target(false)
        .init();

    match cli.command {
        Commands::Generate {
            ingredient,
            allergy,
            cuisine,
            diet,
            read_aloud,
        } => {
            let request = RecipeRequest {
                ingredients: ingredient,
                allergies: allergy,
                cuisine_type: cuisine,
                dietary_preference: diet,
            };
            generate(&cli.server, request, read_aloud).await?;
        }
        Commands::Narrate { text } => {
            let narrator = NarrationController::new(NarrationConfig::default())?;
            narrate(&narrator, &text).await?;
        }
        Commands::Voices => {
            let narrator = NarrationController::new(NarrationConfig::default())?;
            let voices = narrator.voices().await;
            if voices.is_empty() {
                println!("No speech engine voices available.");
            } else {
                for voice in voices {
                    println!("{}", voice);
                }
            }
        }
    }

    Ok(())
}

async fn generate(server: &str, request: RecipeRequest, read_aloud: bool) -> anyhow::Result<()> {
    request
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid request: {}", e))?;

    println!("🍳 Generating recipes...");
    debug!(server = %server, "Sending recipe request");

    let url = format!("{}/api/recipes/generate", server.trim_end_matches('/'));
    let response: RecipeResponse = reqwest::Client::new()
        .post(&url)
        .json(&request)
        .send()
        .await?
        .json()
        .await?;

    if !response.success {
        anyhow::bail!(
            "Generation failed: {}",
            response.error.unwrap_or_else(|| "unknown error".to_string())
        );
    }

    for (i, recipe) in response.recipes.iter().enumerate() {
        print_recipe(i + 1, recipe);
    }

    if read_aloud {
        if let Some(recipe) = response.recipes.first() {
            let narrator = NarrationController::new(NarrationConfig::default())?;
            narrate(&narrator, &recipe_script(recipe)).await?;
        }
    }

    Ok(())
}

/// Speak text and block until playback finishes
async fn narrate(narrator: &NarrationController, text: &str) -> anyhow::Result<()> {
    if !narrator.is_available() {
        anyhow::bail!("No speech engine available on this system");
    }

    println!("🔊 Reading aloud... (Ctrl+C to stop)");
    narrator.speak(text);

    while narrator.is_speaking() {
        tokio::time::sleep(Duration::from_millis(200)).await;
    }

    Ok(())
}

fn print_recipe(number: usize, recipe: &Recipe) {
    println!();
    println!("━━━ Recipe {}: {} ━━━", number, recipe.title);
    if let Some(ref time) = recipe.preparation_time {
        println!("⏱️  {}", time);
    }
    if let Some(servings) = recipe.servings {
        println!("🍽️  Serves {}", servings);
    }
    println!();
    println!("Ingredients:");
    for ingredient in &recipe.ingredients {
        println!("  • {}", ingredient);
    }
    println!();
    println!("Instructions:");
    for (i, step) in recipe.instructions.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    if let Some(ref nutrition) = recipe.nutritional_info {
        println!();
        println!(
            "Nutrition (per serving): {} kcal, {}g protein, {}g carbs, {}g fat",
            nutrition.calories, nutrition.protein, nutrition.carbs, nutrition.fat
        );
    }
}

/// Compose the text a recipe is read out as
fn recipe_script(recipe: &Recipe) -> String {
    let mut script = format!("Recipe: {}. ", recipe.title);

    if let Some(ref time) = recipe.preparation_time {
        script.push_str(&format!("Preparation time: {}. ", time));
    }
    if let Some(servings) = recipe.servings {
        script.push_str(&format!("Serves {}. ", servings));
    }

    script.push_str("You will need: ");
    script.push_str(&recipe.ingredients.join(", "));
    script.push_str(". ");

    for (i, step) in recipe.instructions.iter().enumerate() {
        script.push_str(&format!("Step {}. {} ", i + 1, step));
    }

    script
}
