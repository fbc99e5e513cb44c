//! Locale routing guard.
//!
//! Redirects non-localized routes to the default locale while excluding
//! API endpoints and static asset paths. The decision itself is a pure
//! function of the request path, wrapped in an axum middleware.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::i18n::{Locale, LocaleRegistry};

/// Path prefixes the guard never rewrites: internal endpoints and static
/// assets that have no locale dimension.
const EXCLUDED_PREFIXES: &[&str] = &[
    "/api",
    "/sitemap.xml",
    "/favicon.ico",
    "/robots.txt",
    "/static",
];

/// Whether the path already carries a supported locale prefix
/// (`/en`, `/en/...`, `/fr`, `/fr/...`).
fn has_locale_prefix(path: &str) -> bool {
    LocaleRegistry::get().list_enabled().iter().any(|locale| {
        let prefix = format!("/{}", locale.code);
        path == prefix || path.starts_with(&format!("{}/", prefix))
    })
}

/// Compute the redirect target for a path, if any.
///
/// Returns `None` when the request should pass through (already localized,
/// or an excluded internal/static path), otherwise the default-locale
/// equivalent path.
pub fn redirect_target(path: &str) -> Option<String> {
    if EXCLUDED_PREFIXES
        .iter()
        .any(|prefix| path == *prefix || path.starts_with(&format!("{}/", prefix)))
    {
        return None;
    }

    if has_locale_prefix(path) {
        return None;
    }

    // Default all bare routes to the default locale.
    let default_code = Locale::default_locale().code();
    let suffix = if path == "/" { "" } else { path };

    Some(format!("/{}{}", default_code, suffix))
}

/// Axum middleware applying the redirect decision, preserving the query
/// string on rewrite.
pub async fn locale_guard(request: Request, next: Next) -> Response {
    let path = request.uri().path();

    if let Some(mut target) = redirect_target(path) {
        if let Some(query) = request.uri().query() {
            target.push('?');
            target.push_str(query);
        }

        return Redirect::temporary(&target).into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_redirects_to_default_locale() {
        assert_eq!(redirect_target("/"), Some("/en".to_string()));
    }

    #[test]
    fn test_bare_recipe_path_redirects() {
        assert_eq!(
            redirect_target("/recipes/foo"),
            Some("/en/recipes/foo".to_string())
        );
    }

    #[test]
    fn test_localized_paths_pass_through() {
        assert_eq!(redirect_target("/en"), None);
        assert_eq!(redirect_target("/en/recipes/foo"), None);
        assert_eq!(redirect_target("/fr"), None);
        assert_eq!(redirect_target("/fr/recipes/fr-recipe-001"), None);
    }

    #[test]
    fn test_excluded_prefixes_pass_through() {
        assert_eq!(redirect_target("/api/seed"), None);
        assert_eq!(redirect_target("/api"), None);
        assert_eq!(redirect_target("/sitemap.xml"), None);
        assert_eq!(redirect_target("/favicon.ico"), None);
        assert_eq!(redirect_target("/robots.txt"), None);
        assert_eq!(redirect_target("/static/styles.css"), None);
    }

    #[test]
    fn test_locale_prefix_must_be_a_segment() {
        // "/end" starts with "/en" as a string but is not a locale segment.
        assert_eq!(redirect_target("/end"), Some("/en/end".to_string()));
        assert_eq!(
            redirect_target("/french-cooking"),
            Some("/en/french-cooking".to_string())
        );
    }

    #[test]
    fn test_unsupported_locale_code_is_rewritten() {
        // "es" is not in the registry, so the path is treated as bare.
        assert_eq!(
            redirect_target("/es/recipes/foo"),
            Some("/en/es/recipes/foo".to_string())
        );
    }
}
