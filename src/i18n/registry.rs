//! Locale registry: Single source of truth for all supported locales.
//!
//! This module provides a centralized registry of all locales the site can
//! render. It uses a singleton pattern with `OnceLock` to ensure thread-safe
//! initialization and access.

use std::sync::OnceLock;

/// Configuration for a supported locale.
///
/// Contains all metadata for a specific locale, including its code, names,
/// Open Graph code, enabled status, and whether it's the default locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// ISO 639-1 locale code used in URLs and slugs (e.g., "en", "fr")
    pub code: &'static str,

    /// English name of the locale (e.g., "English", "French")
    pub name: &'static str,

    /// Native name of the locale (e.g., "English", "Français")
    pub native_name: &'static str,

    /// Open Graph locale identifier (e.g., "en_US", "fr_FR")
    pub og_code: &'static str,

    /// Whether this is the default locale (only one should be true)
    pub is_default: bool,

    /// Whether this locale is enabled for routing and SEO output
    pub enabled: bool,
}

/// Global locale registry singleton.
///
/// The registry contains all supported locales and provides methods to query
/// and access them. It's initialized once on first access and remains
/// immutable thereafter. Iteration order is fixed: the default locale first,
/// then the remaining locales in declaration order. Alternate maps and
/// sitemap canonical fallbacks both rely on this order.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get a locale configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LocaleConfig)` if the locale exists
    /// * `None` if the locale is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// Get all enabled locales, in registry iteration order.
    pub fn list_enabled(&self) -> Vec<&LocaleConfig> {
        self.locales
            .iter()
            .filter(|locale| locale.enabled)
            .collect()
    }

    /// Get all locales (including disabled ones).
    pub fn list_all(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().collect()
    }

    /// Get the default locale configuration.
    ///
    /// The default locale is the redirect target for bare paths and the
    /// `x-default` hreflang target. There should be exactly one.
    ///
    /// # Panics
    /// Panics if no default locale is found or if multiple default locales
    /// are defined (this indicates a configuration error).
    pub fn default_locale(&self) -> &LocaleConfig {
        let defaults: Vec<_> = self
            .locales
            .iter()
            .filter(|locale| locale.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default locale found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default locales found in registry"),
        }
    }

    /// Check if a locale code is supported and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|locale| locale.enabled)
            .unwrap_or(false)
    }
}

/// Default locale configurations.
///
/// This function returns the initial set of supported locales.
/// Currently supports English (default) and French.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "en",
            name: "English",
            native_name: "English",
            og_code: "en_US",
            is_default: true,
            enabled: true,
        },
        LocaleConfig {
            code: "fr",
            name: "French",
            native_name: "Français",
            og_code: "fr_FR",
            is_default: false,
            enabled: true,
        },
    ]
}
