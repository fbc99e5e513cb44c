//! Backend recipes API client and locale-aware slug resolution.
//!
//! The backend owns all recipe data; this module is a thin `reqwest`
//! wrapper over its REST surface (list, get, seed) plus the fallback chain
//! that resolves a requested slug to a recipe in the visitor's locale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::i18n::Locale;
use crate::slug::{build_slug, localize_slug, slug_index};

/// Maximum number of recipes a single seed request may create.
pub const MAX_SEED_AMOUNT: u32 = 50;

/// Fixed timeout for backend requests.
const REQUEST_TIMEOUT_SECONDS: u64 = 10;

/// A recipe record as served by the backend API (camelCase on the wire).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub slug: String,
    pub locale: String,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub image_path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Error payload the backend attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    message: Option<String>,
}

/// Result of a seed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedResponse {
    pub seeded: u32,
    pub amount: u32,
}

/// Error taxonomy for backend access.
///
/// Only `NotFound` triggers the resolver's fallback chain; `Validation`
/// never reaches the network, and `Transport` covers everything else
/// (connection failures, timeouts, non-404 error statuses).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("recipe not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("backend request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

/// Outcome of resolving a slug for a locale.
///
/// Distinguishes an exact hit from the two best-effort substitutions, so
/// pages can tell visitors (and tests can assert) when a translation was
/// missing and something else was shown instead.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// The localized slug matched a recipe directly.
    Exact(Recipe),

    /// The exact slug was missing, but the target locale has a recipe with
    /// the same numeric index.
    SameIndex(Recipe),

    /// No matching index either; the locale's first available recipe.
    FirstAvailable(Recipe),
}

impl Resolution {
    pub fn recipe(&self) -> &Recipe {
        match self {
            Resolution::Exact(recipe) => recipe,
            Resolution::SameIndex(recipe) => recipe,
            Resolution::FirstAvailable(recipe) => recipe,
        }
    }

    pub fn into_recipe(self) -> Recipe {
        match self {
            Resolution::Exact(recipe) => recipe,
            Resolution::SameIndex(recipe) => recipe,
            Resolution::FirstAvailable(recipe) => recipe,
        }
    }

    /// True when the requested slug matched directly, without fallback.
    pub fn is_exact(&self) -> bool {
        matches!(self, Resolution::Exact(_))
    }
}

/// Thin client over the backend recipes REST API.
#[derive(Debug, Clone)]
pub struct RecipesClient {
    client: reqwest::Client,
    base_url: String,
    internal_api_key: Option<String>,
}

impl RecipesClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            internal_api_key: config.internal_api_key.clone(),
        })
    }

    /// List all recipes for a locale.
    pub async fn list_recipes(&self, locale: Locale) -> Result<Vec<Recipe>, ApiError> {
        let url = format!("{}/recipes", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("locale", locale.code())])
            .header("Accept", "application/json")
            .send()
            .await?;

        let response = check_status(response).await?;
        let recipes: Vec<Recipe> = response.json().await?;

        debug!("Fetched {} recipes for locale {}", recipes.len(), locale.code());
        Ok(recipes)
    }

    /// List all recipes across locales (used by the sitemap).
    pub async fn list_all_recipes(&self) -> Result<Vec<Recipe>, ApiError> {
        let url = format!("{}/recipes", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let response = check_status(response).await?;
        let recipes: Vec<Recipe> = response.json().await?;

        debug!("Fetched {} recipes across all locales", recipes.len());
        Ok(recipes)
    }

    /// Fetch a single recipe by slug or backend id.
    pub async fn get_recipe(&self, slug_or_id: &str) -> Result<Recipe, ApiError> {
        let url = format!("{}/recipes/{}", self.base_url, slug_or_id);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Trigger seeding of sample recipes on the backend.
    ///
    /// The amount is validated before any network call: 0 and anything
    /// above [`MAX_SEED_AMOUNT`] are rejected locally. Requires the
    /// internal API key from configuration. Never retried.
    pub async fn seed_recipes(&self, amount: u32) -> Result<SeedResponse, ApiError> {
        if amount < 1 || amount > MAX_SEED_AMOUNT {
            return Err(ApiError::Validation(format!(
                "Seed amount must be between 1 and {}",
                MAX_SEED_AMOUNT
            )));
        }

        let api_key = self.internal_api_key.as_deref().ok_or_else(|| {
            ApiError::Validation("INTERNAL_API_KEY is not configured".to_string())
        })?;

        let url = format!("{}/recipes/seed", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-internal-api-key", api_key)
            .json(&serde_json::json!({ "amount": amount }))
            .send()
            .await?;

        let response = check_status(response).await?;
        let seeded: SeedResponse = response.json().await?;

        info!("Seeded {} of {} requested recipes", seeded.seeded, seeded.amount);
        Ok(seeded)
    }
}

/// Map a backend response status onto the error taxonomy.
///
/// 404 is the only status treated as `NotFound`; any other non-success
/// status becomes `Transport`, carrying the backend's message when the
/// body has one.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound);
    }

    let message = response
        .json::<ApiErrorResponse>()
        .await
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| "no error message".to_string());

    Err(ApiError::Transport(format!(
        "backend returned {}: {}",
        status, message
    )))
}

/// Resolve a requested slug (possibly in another locale's format, possibly
/// a backend id) to a recipe in the target locale.
///
/// Fallback chain, in order:
/// 1. Localize the slug and fetch it directly.
/// 2. On not-found only, fetch the locale's full list; an empty list
///    propagates the original not-found.
/// 3. If the requested slug carries a numeric index, return the list entry
///    with the same index in the target locale.
/// 4. Otherwise return the first recipe of the list.
///
/// Steps 2-4 deliberately prefer showing a relevant recipe over a hard 404
/// when a translation is missing. Transport failures at any step propagate
/// immediately without fallback.
pub async fn resolve_for_locale(
    client: &RecipesClient,
    slug_or_id: &str,
    locale: Locale,
) -> Result<Resolution, ApiError> {
    // Translate the route slug to the requested locale namespace.
    let localized = localize_slug(slug_or_id, locale);

    match client.get_recipe(&localized).await {
        Ok(recipe) => Ok(Resolution::Exact(recipe)),
        Err(ApiError::NotFound) => {
            debug!(
                "No direct match for '{}' in locale {}, trying list fallback",
                localized,
                locale.code()
            );

            let mut recipes = client.list_recipes(locale).await?;
            if recipes.is_empty() {
                return Err(ApiError::NotFound);
            }

            // Prefer the same recipe index across locales (e.g., 001 -> 001).
            if let Some(index) = slug_index(slug_or_id) {
                let same_index_slug = build_slug(locale, index);
                if let Some(position) = recipes.iter().position(|recipe| recipe.slug == same_index_slug)
                {
                    return Ok(Resolution::SameIndex(recipes.swap_remove(position)));
                }
            }

            Ok(Resolution::FirstAvailable(recipes.remove(0)))
        }
        Err(err) => Err(err),
    }
}
