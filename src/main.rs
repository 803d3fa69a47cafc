use clap::Parser;
use larder::{
    api::{handlers::AppState, routes},
    cli::{Cli, Commands},
    config::Settings,
    generate::{GeneratorConfig, RecipeGenerator},
    index::RecipeIndex,
    normalizer::TextNormalizer,
    Error, Result,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,larder=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::from_env()?;
    settings.validate()?;

    match cli.command {
        Commands::Serve { port, host } => {
            serve(settings, port, host).await?;
        }
        Commands::Search { ingredients, limit } => {
            larder::cli::commands::search(&settings, &ingredients, limit)?;
        }
        Commands::Stats => {
            larder::cli::commands::stats(&settings)?;
        }
    }

    Ok(())
}

async fn serve(mut settings: Settings, port: Option<u16>, host: Option<String>) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }

    info!("Starting Larder server");
    info!("Corpus: {:?}", settings.data.recipes_path);
    info!("Server: {}:{}", settings.server.host, settings.server.port);

    // Build the normalizer; a missing synonyms file degrades to an empty table
    let normalizer = TextNormalizer::from_synonyms_file(&settings.data.synonyms_path);

    // Build the search index; a missing corpus is fatal
    let index = Arc::new(RecipeIndex::load(&settings.data.recipes_path, normalizer)?);
    info!(
        "Search index ready: {} recipes ({} rows skipped)",
        index.count(),
        index.skipped()
    );

    // Initialize the recipe generator if configured
    let generator = {
        let config = GeneratorConfig::from_env();
        if config.is_enabled() {
            match RecipeGenerator::new(config) {
                Ok(generator) => {
                    info!("Recipe generator enabled");
                    Some(generator)
                }
                Err(e) => {
                    warn!("Failed to initialize recipe generator: {e}");
                    None
                }
            }
        } else {
            info!("Recipe generator disabled (no API key)");
            None
        }
    };

    // Create application state
    let state = AppState {
        index,
        generator,
        settings: settings.clone(),
    };

    let app = routes::create_router(state, &settings);

    // Start server
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    println!("\n========================================");
    println!("Larder Recipe Search");
    println!("========================================");
    println!("Status: Running");
    println!("Address: http://{addr}");
    println!("\nAPI Endpoints:");
    println!("  GET  /health");
    println!("  GET  /api/search");
    println!("  POST /api/suggest");
    println!("  GET  /api/recipes/:id");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}
