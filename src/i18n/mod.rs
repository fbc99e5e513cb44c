//! Internationalization (i18n) module for the localized recipe blog.
//!
//! This module provides a centralized, extensible architecture for managing
//! the locales the site can render. All locale metadata, validated locale
//! handles, and localized UI strings live here.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported locales and their metadata
//! - `locale`: Type-safe Locale handle validated against the registry
//! - `strings`: Centralized localized UI strings
//!
//! # Example
//!
//! ```rust,ignore
//! use recipe_blog::i18n::{Locale, UiStrings};
//!
//! // Get the default locale (English)
//! let default = Locale::default_locale();
//!
//! // Create a locale from a route segment
//! let french = Locale::from_code("fr")?;
//!
//! // Look up the localized string table
//! let strings = UiStrings::for_locale(french);
//! ```

mod locale;
mod registry;
mod strings;

pub use locale::Locale;
pub use registry::{LocaleConfig, LocaleRegistry};
pub use strings::UiStrings;
