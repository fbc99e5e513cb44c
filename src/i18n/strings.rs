//! Centralized localized UI strings.
//!
//! All user-facing text rendered by the page templates lives here, one
//! string table per locale. Strings are stored raw (unescaped); templates
//! escape them with `pages::escape_html` at render time. Placeholders use
//! `{name}` syntax and are substituted at the call site with
//! `str::replace`.

use crate::i18n::Locale;

/// All localized user-facing strings for a locale.
#[derive(Debug, Clone)]
pub struct UiStrings {
    // ==================== Site Chrome ====================
    /// Site name used in titles, headers and Open Graph metadata
    pub site_name: &'static str,

    /// One-line site description used for meta description and the hero
    pub site_tagline: &'static str,

    /// Small badge label shown above the landing page heading
    pub journal_badge: &'static str,

    /// Notice explaining that recipes are sample data
    pub data_notice: &'static str,

    // ==================== Recipe List ====================
    /// Error panel text when the recipe list cannot be loaded
    pub recipes_load_failed: &'static str,

    /// Shown when the backend has no recipes for the locale
    pub recipes_empty: &'static str,

    /// Link text on a recipe card leading to the detail page
    pub read_recipe: &'static str,

    // ==================== Recipe Detail ====================
    /// Title used when a recipe cannot be found
    pub recipe_not_found: &'static str,

    /// Heading for the ingredient list
    pub ingredients_heading: &'static str,

    /// Heading for the preparation steps
    pub steps_heading: &'static str,

    /// Link back to the locale landing page
    pub back_to_recipes: &'static str,

    /// Banner shown when the requested translation is missing and a
    /// best-effort substitute is displayed instead
    pub fallback_notice: &'static str,

    // ==================== Seeding ====================
    /// Label for the seed amount input
    pub seed_amount_label: &'static str,

    /// Seed form submit button
    pub seed_now: &'static str,

    /// Hint about the seed amount bounds
    /// Placeholders: {max}
    pub seed_limit_hint: &'static str,

    /// Success message after seeding
    /// Placeholders: {seeded}, {amount}
    pub seed_success: &'static str,

    /// Generic failure message when seeding fails
    pub seed_failed: &'static str,

    /// Validation message for an out-of-range seed amount
    /// Placeholders: {max}
    pub seed_range: &'static str,

    // ==================== Sitemap Preview ====================
    /// Heading of the sitemap preview panel
    pub sitemap_preview_title: &'static str,

    /// Hint under the sitemap preview heading
    pub sitemap_preview_hint: &'static str,

    /// Countdown label while waiting for the next refresh
    /// Placeholders: {seconds}
    pub sitemap_countdown: &'static str,

    /// Label shown while a sitemap refresh is in flight
    pub sitemap_revalidating: &'static str,

    /// Shown before the first sitemap fetch has completed
    pub sitemap_loading: &'static str,
}

impl UiStrings {
    /// Get the string table for a locale.
    pub fn for_locale(locale: Locale) -> &'static UiStrings {
        match locale.code() {
            "fr" => &FRENCH_STRINGS,
            _ => &ENGLISH_STRINGS,
        }
    }
}

// ==================== English Strings ====================

/// English strings (default locale)
pub const ENGLISH_STRINGS: UiStrings = UiStrings {
    // Site chrome
    site_name: "Localized Recipe Blog",
    site_tagline: "A localized recipe storytelling interface.",
    journal_badge: "Localized recipe journal",
    data_notice: "All recipes are sample data seeded through the backend API.",

    // Recipe list
    recipes_load_failed: "Unable to load recipes.",
    recipes_empty: "No recipes yet. Seed a few to get started.",
    read_recipe: "Read the recipe",

    // Recipe detail
    recipe_not_found: "Recipe not found",
    ingredients_heading: "Ingredients",
    steps_heading: "Steps",
    back_to_recipes: "Back to all recipes",
    fallback_notice: "This recipe is not available in your language yet. Showing the closest match instead.",

    // Seeding
    seed_amount_label: "Number of recipes",
    seed_now: "Seed recipes",
    seed_limit_hint: "Up to {max} recipes per request.",
    seed_success: "Seeded {seeded} of {amount} requested recipes.",
    seed_failed: "Unable to seed recipes.",
    seed_range: "Amount must be between 1 and {max}.",

    // Sitemap preview
    sitemap_preview_title: "Sitemap preview",
    sitemap_preview_hint: "Live view of sitemap.xml as crawlers see it. Seeding restarts the countdown.",
    sitemap_countdown: "Next refresh in {seconds}s",
    sitemap_revalidating: "Refreshing…",
    sitemap_loading: "Loading sitemap…",
};

// ==================== French Strings ====================

/// French strings
pub const FRENCH_STRINGS: UiStrings = UiStrings {
    // Site chrome
    site_name: "Blog de Recettes Localisé",
    site_tagline: "Une interface de recettes localisée et narrative.",
    journal_badge: "Journal de recettes localisé",
    data_notice: "Toutes les recettes sont des données d'exemple créées via l'API backend.",

    // Recipe list
    recipes_load_failed: "Impossible de charger les recettes.",
    recipes_empty: "Aucune recette pour le moment. Lancez un seed pour commencer.",
    read_recipe: "Lire la recette",

    // Recipe detail
    recipe_not_found: "Recette introuvable",
    ingredients_heading: "Ingrédients",
    steps_heading: "Étapes",
    back_to_recipes: "Retour aux recettes",
    fallback_notice: "Cette recette n'est pas encore disponible dans votre langue. Voici la recette la plus proche.",

    // Seeding
    seed_amount_label: "Nombre de recettes",
    seed_now: "Créer des recettes",
    seed_limit_hint: "Jusqu'à {max} recettes par requête.",
    seed_success: "{seeded} recettes créées sur {amount} demandées.",
    seed_failed: "Impossible de créer les recettes.",
    seed_range: "Le nombre doit être compris entre 1 et {max}.",

    // Sitemap preview
    sitemap_preview_title: "Aperçu du sitemap",
    sitemap_preview_hint: "Vue en direct de sitemap.xml telle que les robots la voient. Un seed relance le compte à rebours.",
    sitemap_countdown: "Prochain rafraîchissement dans {seconds}s",
    sitemap_revalidating: "Rafraîchissement…",
    sitemap_loading: "Chargement du sitemap…",
};
