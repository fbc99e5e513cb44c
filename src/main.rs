use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use recipe_blog::config::Config;
use recipe_blog::preview;
use recipe_blog::recipes::RecipesClient;
use recipe_blog::routes::{self, AppState};
use recipe_blog::sitemap::SitemapService;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("recipe_blog=info".parse()?),
        )
        .init();

    info!("Starting recipe blog frontend");

    // Load configuration from environment
    let config = Arc::new(Config::from_env()?);

    let client = Arc::new(RecipesClient::new(&config)?);
    let sitemap = Arc::new(SitemapService::new(Arc::clone(&config), Arc::clone(&client)));

    // Background sitemap preview countdown
    let preview = preview::spawn(Arc::clone(&sitemap), config.preview_interval_seconds);

    let state = AppState {
        config: Arc::clone(&config),
        client,
        sitemap,
        preview,
    };

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("Listening on port {}", config.port);

    axum::serve(listener, routes::router(state)).await?;

    Ok(())
}
