//! Localized recipe slug model.
//!
//! Recipe slugs follow the convention `<locale>-recipe-<zero-padded-number>`
//! (e.g., `en-recipe-001`, `fr-recipe-042`). Instead of regex-replacing
//! locale prefixes wherever a slug crosses a locale boundary, this module
//! parses a slug into a tagged `LocalizedSlug` (locale + locale-independent
//! base) at the boundary and formats it back when building URLs.

use std::fmt;

use tracing::warn;

use crate::i18n::Locale;

/// A recipe slug parsed into its locale tag and locale-independent base.
///
/// For `en-recipe-001`, the locale is `en` and the base is `recipe-001`.
/// The base doubles as the cross-locale grouping key used by the sitemap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedSlug {
    locale: Locale,
    base: String,
}

impl LocalizedSlug {
    /// Parse a slug of the form `<locale>-<base>`.
    ///
    /// Returns `None` when the slug does not start with a recognized,
    /// enabled locale code followed by a dash, or when the base is empty.
    pub fn parse(slug: &str) -> Option<LocalizedSlug> {
        let (prefix, base) = slug.split_once('-')?;
        let locale = Locale::from_code(prefix).ok()?;

        if base.is_empty() {
            return None;
        }

        Some(LocalizedSlug {
            locale,
            base: base.to_string(),
        })
    }

    /// The locale encoded in the slug prefix.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// The locale-independent part of the slug (e.g., `recipe-001`).
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Re-tag this slug with another locale, keeping the base.
    pub fn with_locale(&self, locale: Locale) -> LocalizedSlug {
        LocalizedSlug {
            locale,
            base: self.base.clone(),
        }
    }
}

impl fmt::Display for LocalizedSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.locale.code(), self.base)
    }
}

/// Translate a slug into the target locale's namespace.
///
/// `en-recipe-001` localized to `fr` becomes `fr-recipe-001`. Idempotent:
/// localizing an already-localized slug to its own locale is the identity.
///
/// Slugs without a recognized locale prefix are passed through unchanged so
/// that backend ids and hand-typed URLs keep working, but the anomaly is
/// logged: a prefix-less slug on a localized route usually means a broken
/// link upstream.
pub fn localize_slug(slug: &str, target: Locale) -> String {
    match LocalizedSlug::parse(slug) {
        Some(parsed) => parsed.with_locale(target).to_string(),
        None => {
            warn!("Slug '{}' has no recognized locale prefix, passing through", slug);
            slug.to_string()
        }
    }
}

/// Cross-locale grouping key for a slug.
///
/// `en-recipe-001` and `fr-recipe-001` both map to `recipe-001`, so the
/// sitemap can group them as one logical recipe. Slugs without a recognized
/// locale prefix group under themselves.
pub fn group_key(slug: &str) -> String {
    match LocalizedSlug::parse(slug) {
        Some(parsed) => parsed.base().to_string(),
        None => slug.to_string(),
    }
}

/// Extract the trailing numeric index from a slug.
///
/// Matches the literal `recipe-` followed by digits at the end of the
/// string, so `fr-recipe-007` yields `7`. Returns `None` for slugs that do
/// not follow the numbered convention (backend ids, arbitrary slugs).
pub fn slug_index(slug: &str) -> Option<u32> {
    // Index pattern is fixed by the backend's slug convention (regex crate caches compilation).
    let index_regex = regex::Regex::new(r"recipe-(\d+)$").unwrap();

    index_regex
        .captures(slug)?
        .get(1)
        .and_then(|digits| digits.as_str().parse().ok())
}

/// Build the canonical slug for a locale and recipe index.
///
/// Indexes are zero-padded to three digits to match the backend's slug
/// format: `build_slug(fr, 7)` is `fr-recipe-007`.
pub fn build_slug(locale: Locale, index: u32) -> String {
    format!("{}-recipe-{:03}", locale.code(), index)
}
