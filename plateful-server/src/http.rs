// HTTP API for recipe generation

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use plateful_core::{RecipeRequest, RecipeResponse};
use plateful_llm::{RecipeError, RecipeGenerator};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct ApiState {
    pub generator: Arc<RecipeGenerator>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    provider: &'static str,
    api_key_configured: bool,
}

/// Build the application router
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/recipes/generate", post(generate_recipes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        provider: state.generator.provider_name(),
        api_key_configured: state.generator.has_api_key(),
    })
}

/// Generate recipes for a request.
///
/// Generation failures are reported in-band as a `success: false`
/// envelope with HTTP 200 so web clients get a displayable message;
/// 400 is reserved for requests that fail validation.
async fn generate_recipes(
    State(state): State<ApiState>,
    Json(request): Json<RecipeRequest>,
) -> impl IntoResponse {
    match state.generator.generate(&request).await {
        Ok(recipes) => {
            info!(count = recipes.len(), "Recipe generation succeeded");
            (StatusCode::OK, Json(RecipeResponse::ok(recipes)))
        }
        Err(RecipeError::InvalidRequest(msg)) => {
            warn!(error = %msg, "Rejected invalid recipe request");
            (StatusCode::BAD_REQUEST, Json(RecipeResponse::failed(msg)))
        }
        Err(RecipeError::MissingApiKey(provider)) => {
            warn!(provider = %provider, "Recipe request without configured API key");
            (
                StatusCode::OK,
                Json(RecipeResponse::failed("API key not provided")),
            )
        }
        Err(e) => {
            error!(error = %e, "Recipe generation failed");
            (
                StatusCode::OK,
                Json(RecipeResponse::failed(format!(
                    "Failed to generate recipes: {}",
                    e
                ))),
            )
        }
    }
}
