//! Dynamic sitemap construction.
//!
//! Strategy:
//! - Group per-locale recipe records into one logical entry per recipe,
//!   keyed by the locale-stripped slug base.
//! - Emit one canonical URL per group with per-locale hreflang alternates.
//! - Cache the rendered XML for an hour so crawler traffic stays off the
//!   backend while still reflecting seeded data.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, SecondsFormat, Utc};
use tokio::sync::RwLock;
use tracing::warn;

use crate::config::Config;
use crate::i18n::Locale;
use crate::recipes::{Recipe, RecipesClient};
use crate::seo::{absolute_url, SeoRecipes};
use crate::slug::{group_key, localize_slug};

/// Revalidation window for the rendered sitemap, in seconds.
pub const SITEMAP_REVALIDATE_SECONDS: u64 = 3600;

/// Per-locale slugs of one logical recipe.
pub type LocaleSlugs = Vec<(Locale, String)>;

/// Site-relative path of a recipe page, localizing the slug on the way.
pub fn recipe_path(locale: Locale, slug: &str) -> String {
    format!("/{}/recipes/{}", locale.code(), localize_slug(slug, locale))
}

/// One `<url>` element of the sitemap.
#[derive(Debug, Clone)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: Option<&'static str>,
    pub priority: Option<f32>,
    /// Absolute alternate URLs, one per locale that has this page.
    pub alternates: Vec<(Locale, String)>,
}

/// Group a flat recipe list into logical cross-locale units.
///
/// Groups are keyed by the locale-stripped slug base and kept in insertion
/// order of first encounter. Within a group, a later recipe for the same
/// locale overwrites the earlier slug (the backend enforces uniqueness
/// upstream, so this only matters for malformed data). Recipes whose
/// `locale` field is not a supported locale are skipped.
pub fn group_recipes(recipes: &[Recipe]) -> Vec<(String, LocaleSlugs)> {
    let mut groups: Vec<(String, LocaleSlugs)> = Vec::new();

    for recipe in recipes {
        let locale = match Locale::from_code(&recipe.locale) {
            Ok(locale) => locale,
            Err(_) => {
                warn!(
                    "Skipping recipe '{}' with unsupported locale '{}'",
                    recipe.slug, recipe.locale
                );
                continue;
            }
        };

        let key = group_key(&recipe.slug);

        let group_position = match groups.iter().position(|(existing, _)| *existing == key) {
            Some(position) => position,
            None => {
                groups.push((key, Vec::new()));
                groups.len() - 1
            }
        };

        let slugs = &mut groups[group_position].1;
        match slugs.iter().position(|(existing, _)| *existing == locale) {
            Some(position) => slugs[position].1 = recipe.slug.clone(),
            None => slugs.push((locale, recipe.slug.clone())),
        }
    }

    groups
}

/// Pick the canonical locale and slug for a group.
///
/// Prefers the default locale, then falls back through registry order.
/// Returns `None` for an empty group (which is then skipped rather than
/// emitted as a broken URL).
fn canonical_entry(slugs: &LocaleSlugs) -> Option<(Locale, &str)> {
    for locale in Locale::all() {
        if let Some((_, slug)) = slugs.iter().find(|(candidate, _)| *candidate == locale) {
            return Some((locale, slug.as_str()));
        }
    }

    None
}

/// Build the full sitemap entry list from a recipe snapshot.
///
/// Output order: the locale landing entry first, then one entry per
/// non-empty recipe group in grouping order.
pub fn build_entries(config: &Config, recipes: &[Recipe]) -> Vec<SitemapEntry> {
    let default_locale = Locale::default_locale();

    let mut entries = vec![SitemapEntry {
        url: absolute_url(config, &format!("/{}", default_locale.code())),
        last_modified: Utc::now(),
        change_frequency: None,
        priority: None,
        alternates: Locale::all()
            .into_iter()
            .map(|locale| (locale, absolute_url(config, &format!("/{}", locale.code()))))
            .collect(),
    }];

    for (_, slugs) in group_recipes(recipes) {
        let Some((canonical_locale, canonical_slug)) = canonical_entry(&slugs) else {
            continue;
        };

        // Any locale variant in the group can represent freshness for this entry.
        let last_modified = recipes
            .iter()
            .find(|recipe| slugs.iter().any(|(_, slug)| *slug == recipe.slug))
            .map(|recipe| recipe.updated_at)
            .unwrap_or_else(Utc::now);

        let alternates = Locale::all()
            .into_iter()
            .filter_map(|locale| {
                let (_, slug) = slugs.iter().find(|(candidate, _)| *candidate == locale)?;
                Some((locale, absolute_url(config, &recipe_path(locale, slug))))
            })
            .collect();

        entries.push(SitemapEntry {
            url: absolute_url(config, &recipe_path(canonical_locale, canonical_slug)),
            last_modified,
            change_frequency: Some("daily"),
            priority: Some(0.8),
            alternates,
        });
    }

    entries
}

/// Render sitemap entries as sitemap.org XML with xhtml alternate links.
pub fn render_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::new();

    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(
        "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" \
         xmlns:xhtml=\"http://www.w3.org/1999/xhtml\">\n",
    );

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.url)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            entry.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));

        if let Some(change_frequency) = entry.change_frequency {
            xml.push_str(&format!("    <changefreq>{}</changefreq>\n", change_frequency));
        }

        if let Some(priority) = entry.priority {
            xml.push_str(&format!("    <priority>{:.1}</priority>\n", priority));
        }

        for (locale, href) in &entry.alternates {
            xml.push_str(&format!(
                "    <xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}\"/>\n",
                locale.code(),
                escape_xml(href)
            ));
        }

        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Escape text for XML element and attribute content.
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Sitemap endpoint backing: builds the XML from the shared SEO recipe
/// snapshot and caches the rendered output for an hour.
pub struct SitemapService {
    config: Arc<Config>,
    client: Arc<RecipesClient>,
    seo_recipes: SeoRecipes,
    cache: RwLock<Option<(Instant, String)>>,
}

impl SitemapService {
    pub fn new(config: Arc<Config>, client: Arc<RecipesClient>) -> Self {
        Self {
            config,
            client,
            seo_recipes: SeoRecipes::new(),
            cache: RwLock::new(None),
        }
    }

    /// Rendered sitemap XML, revalidated every
    /// [`SITEMAP_REVALIDATE_SECONDS`]. Never fails: backend errors degrade
    /// to a sitemap containing only the locale landing entry.
    pub async fn sitemap_xml(&self) -> String {
        let ttl = Duration::from_secs(SITEMAP_REVALIDATE_SECONDS);

        if let Some((rendered_at, xml)) = self.cache.read().await.as_ref() {
            if rendered_at.elapsed() < ttl {
                return xml.clone();
            }
        }

        let recipes = self.seo_recipes.get(&self.client).await;
        let xml = render_xml(&build_entries(&self.config, &recipes));

        *self.cache.write().await = Some((Instant::now(), xml.clone()));
        xml
    }
}
