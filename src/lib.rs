//! Locale-aware frontend service for a recipe publishing site.
//!
//! Serves localized HTML pages with full SEO metadata (canonical URLs,
//! hreflang alternates, Open Graph tags), a dynamic `sitemap.xml`, and a
//! locale routing guard, all backed by an external recipes REST API.

pub mod config;
pub mod guard;
pub mod i18n;
pub mod pages;
pub mod preview;
pub mod recipes;
pub mod routes;
pub mod seo;
pub mod sitemap;
pub mod slug;
