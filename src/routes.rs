//! HTTP surface: router assembly and request handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::config::Config;
use crate::guard;
use crate::i18n::{Locale, UiStrings};
use crate::pages;
use crate::preview::SitemapPreview;
use crate::recipes::{resolve_for_locale, ApiError, RecipesClient};
use crate::sitemap::SitemapService;

/// Shared application state. All members are cheaply cloneable handles.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: Arc<RecipesClient>,
    pub sitemap: Arc<SitemapService>,
    pub preview: Arc<SitemapPreview>,
}

/// Build the application router.
///
/// The locale guard wraps everything, so bare paths are rewritten before
/// routing; API endpoints and the sitemap are on the guard's exclusion
/// list.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/sitemap.xml", get(sitemap_xml))
        .route("/api/sitemap-preview", get(sitemap_preview))
        .route("/api/seed", post(seed))
        .route("/:locale", get(landing))
        .route("/:locale/recipes/:slug", get(recipe_detail))
        .with_state(state)
        .layer(middleware::from_fn(guard::locale_guard))
        .layer(TraceLayer::new_for_http())
}

async fn landing(State(state): State<AppState>, Path(locale): Path<String>) -> Response {
    let Ok(locale) = Locale::from_code(&locale) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let snapshot = state.preview.snapshot().await;

    let html = match state.client.list_recipes(locale).await {
        Ok(recipes) => pages::landing_page(&state.config, locale, Ok(&recipes), &snapshot),
        Err(err) => {
            error!("Recipe list fetch failed for {}: {}", locale.code(), err);
            let strings = UiStrings::for_locale(locale);
            pages::landing_page(&state.config, locale, Err(strings.recipes_load_failed), &snapshot)
        }
    };

    Html(html).into_response()
}

async fn recipe_detail(
    State(state): State<AppState>,
    Path((locale, slug)): Path<(String, String)>,
) -> Response {
    let Ok(locale) = Locale::from_code(&locale) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match resolve_for_locale(&state.client, &slug, locale).await {
        Ok(resolution) => {
            Html(pages::recipe_page(&state.config, locale, &resolution)).into_response()
        }
        Err(ApiError::NotFound) => (
            StatusCode::NOT_FOUND,
            Html(pages::recipe_not_found_page(&state.config, locale)),
        )
            .into_response(),
        Err(err) => {
            error!("Recipe resolution failed for '{}': {}", slug, err);
            (
                error_status(&err),
                Html(pages::recipe_error_page(&state.config, locale, &err.to_string())),
            )
                .into_response()
        }
    }
}

async fn sitemap_xml(State(state): State<AppState>) -> Response {
    let xml = state.sitemap.sitemap_xml().await;

    ([(header::CONTENT_TYPE, "application/xml")], xml).into_response()
}

async fn sitemap_preview(State(state): State<AppState>) -> Response {
    Json(state.preview.snapshot().await).into_response()
}

#[derive(Debug, Deserialize)]
struct SeedRequest {
    amount: u32,
}

async fn seed(State(state): State<AppState>, Json(request): Json<SeedRequest>) -> Response {
    match state.client.seed_recipes(request.amount).await {
        Ok(seeded) => {
            // Seeding invalidates the preview's demonstration cycle.
            state.preview.restart_countdown();
            Json(seeded).into_response()
        }
        Err(err) => {
            error!("Seed request failed: {}", err);
            (
                error_status(&err),
                Json(serde_json::json!({ "message": err.to_string() })),
            )
                .into_response()
        }
    }
}

/// Map the client error taxonomy onto response statuses.
fn error_status(err: &ApiError) -> StatusCode {
    match err {
        ApiError::NotFound => StatusCode::NOT_FOUND,
        ApiError::Validation(_) => StatusCode::BAD_REQUEST,
        ApiError::Transport(_) => StatusCode::BAD_GATEWAY,
    }
}
