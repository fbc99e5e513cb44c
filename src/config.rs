use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Public site
    pub site_url: String,

    // Backend API
    pub api_base_url: String,
    pub internal_api_key: Option<String>,

    // Server
    pub port: u16,

    // Sitemap preview
    pub preview_interval_seconds: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Public site base URL used for absolute/canonical URLs
            site_url: std::env::var("SITE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),

            // Backend recipes API
            api_base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3010".to_string()),
            internal_api_key: std::env::var("INTERNAL_API_KEY").ok(),

            // Server
            port: match std::env::var("PORT") {
                Ok(value) => value.parse().context("PORT must be a valid port number")?,
                Err(_) => 3000,
            },

            // Sitemap preview refresh interval (seconds)
            preview_interval_seconds: match std::env::var("SITEMAP_PREVIEW_INTERVAL") {
                Ok(value) => value
                    .parse()
                    .context("SITEMAP_PREVIEW_INTERVAL must be a number of seconds")?,
                Err(_) => 60,
            },
        })
    }
}
