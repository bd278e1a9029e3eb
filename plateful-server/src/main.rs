// Plateful recipe server - launch and it's ready

use clap::Parser;
use plateful_llm::{GenerationConfig, Provider, RecipeGenerator};
use plateful_server::http::{create_router, ApiState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "plateful-server")]
#[command(about = "Plateful recipe generation server", long_about = None)]
#[command(version)]
struct Args {
    /// HTTP port
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Recipe provider (google, mock)
    #[arg(long, default_value = "google")]
    provider: String,

    /// Model identifier for API-backed providers
    #[arg(long, default_value = "gemini-pro")]
    model: String,

    /// Recipes per request
    #[arg(long, default_value = "3")]
    recipe_count: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let args = Args::parse();

    info!("🚀 Starting Plateful server...");

    let provider = Provider::from_str(&args.provider)
        .ok_or_else(|| anyhow::anyhow!("Unknown provider: {}", args.provider))?;

    let config = GenerationConfig {
        provider,
        model: args.model,
        recipe_count: args.recipe_count,
        unsplash_access_key: std::env::var("UNSPLASH_ACCESS_KEY").ok(),
        ..GenerationConfig::default()
    };

    info!("🍳 Initializing recipe generator...");
    let generator = Arc::new(RecipeGenerator::new(config)?);

    if generator.has_api_key() {
        info!("✅ {} provider ready", generator.provider_name());
    } else {
        warn!(
            "⚠️  No API key found for the {} provider. Set {} or use --provider mock; \
             generation requests will fail until a key is configured.",
            generator.provider_name(),
            provider.env_var_name().unwrap_or("the provider API key")
        );
    }

    let state = ApiState { generator };
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("✅ HTTP server listening on http://localhost:{}", args.port);
    info!("🎯 Plateful is ready! Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Plateful server stopped. Goodbye!");
    Ok(())
}

/// Wait for ctrl-c or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
