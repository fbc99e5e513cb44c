//! Print the rendered sitemap XML to stdout without serving it.
//!
//! Useful for checking what crawlers will see after a seed run:
//! `cargo run --bin print-sitemap`

use anyhow::Result;
use tracing::info;

use recipe_blog::config::Config;
use recipe_blog::recipes::RecipesClient;
use recipe_blog::sitemap::{build_entries, render_xml};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("recipe_blog=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let client = RecipesClient::new(&config)?;

    let recipes = client.list_all_recipes().await?;
    info!("Fetched {} recipes for sitemap", recipes.len());

    let entries = build_entries(&config, &recipes);
    print!("{}", render_xml(&entries));

    Ok(())
}
