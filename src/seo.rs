//! SEO utility layer for localized routes.
//!
//! Responsibilities:
//! - Build absolute URLs for metadata, sitemap, and social previews.
//! - Build the per-locale alternate map behind hreflang/canonical tags.
//! - Map locales onto Open Graph identifiers.
//! - Fetch recipe data for SEO routes, degrading to empty output instead of
//!   failing the render.

use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::warn;

use crate::config::Config;
use crate::i18n::Locale;
use crate::recipes::{Recipe, RecipesClient};

/// Revalidation window for SEO data fetches, in seconds.
///
/// Short enough that sitemap and metadata pick up backend changes quickly,
/// long enough to keep crawler bursts off the backend.
pub const SEO_REVALIDATE_SECONDS: u64 = 60;

/// Build an absolute URL on the public site from a path.
///
/// A missing leading slash is tolerated; trailing slashes on the configured
/// site URL are trimmed so joining never doubles them.
pub fn absolute_url(config: &Config, pathname: &str) -> String {
    let base = config.site_url.trim_end_matches('/');

    if pathname.starts_with('/') {
        format!("{}{}", base, pathname)
    } else {
        format!("{}/{}", base, pathname)
    }
}

/// Build the absolute URL of a recipe image.
///
/// Image paths are usually backend-relative (`/images/...`); fully
/// qualified URLs pass through untouched.
pub fn recipe_image_url(config: &Config, image_path: &str) -> String {
    if is_external_url(image_path) {
        return image_path.to_string();
    }

    let base = config.api_base_url.trim_end_matches('/');

    if image_path.starts_with('/') {
        format!("{}{}", base, image_path)
    } else {
        format!("{}/{}", base, image_path)
    }
}

/// Whether a URL points at an external host rather than the backend.
pub fn is_external_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Build the per-locale alternate map for a page.
///
/// Evaluates `path_for` once per enabled locale, in registry iteration
/// order. The result backs hreflang link tags, the language switcher, and
/// sitemap alternates; it is rebuilt for every render and never cached.
pub fn locale_alternates<F>(path_for: F) -> Vec<(Locale, String)>
where
    F: Fn(Locale) -> String,
{
    Locale::all()
        .into_iter()
        .map(|locale| {
            let path = path_for(locale);
            (locale, path)
        })
        .collect()
}

/// Open Graph locale identifiers for every locale except the given one.
pub fn og_alternate_locales(locale: Locale) -> Vec<&'static str> {
    Locale::all()
        .into_iter()
        .filter(|other| *other != locale)
        .map(|other| other.og_code())
        .collect()
}

/// Cached recipe list for SEO routes.
///
/// The sitemap rebuilds its grouping on every request, but the underlying
/// list fetch is shared here with a short revalidation window. Any fetch
/// failure degrades to an empty list (and an empty-but-valid sitemap)
/// rather than an error page; the failure is logged, not surfaced.
pub struct SeoRecipes {
    cache: RwLock<Option<(Instant, Vec<Recipe>)>>,
}

impl SeoRecipes {
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(None),
        }
    }

    /// Get the recipe list, refetching when the cached copy is older than
    /// [`SEO_REVALIDATE_SECONDS`].
    pub async fn get(&self, client: &RecipesClient) -> Vec<Recipe> {
        let ttl = Duration::from_secs(SEO_REVALIDATE_SECONDS);

        if let Some((fetched_at, recipes)) = self.cache.read().await.as_ref() {
            if fetched_at.elapsed() < ttl {
                return recipes.clone();
            }
        }

        let recipes = match client.list_all_recipes().await {
            Ok(recipes) => recipes,
            Err(err) => {
                warn!("SEO recipe fetch failed, degrading to empty list: {}", err);
                Vec::new()
            }
        };

        *self.cache.write().await = Some((Instant::now(), recipes.clone()));
        recipes
    }
}

impl Default for SeoRecipes {
    fn default() -> Self {
        Self::new()
    }
}
