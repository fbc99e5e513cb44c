//! Integration tests for the recipe blog frontend service
//!
//! These tests verify the interaction between the data access client, the
//! slug resolution fallback chain, and the sitemap pipeline against a
//! mocked backend API.

use std::sync::Arc;

use wiremock::{
    matchers::{body_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use recipe_blog::config::Config;
use recipe_blog::i18n::Locale;
use recipe_blog::recipes::{
    resolve_for_locale, ApiError, RecipesClient, Resolution, MAX_SEED_AMOUNT,
};
use recipe_blog::sitemap::SitemapService;
use recipe_blog::slug::{build_slug, localize_slug};

// ==================== Test Helpers ====================

/// Create a test config pointing at a mocked backend
fn create_test_config(api_base_url: &str) -> Config {
    Config {
        site_url: "https://recipes.example.com".to_string(),
        api_base_url: api_base_url.to_string(),
        internal_api_key: Some("test-internal-key".to_string()),
        port: 3000,
        preview_interval_seconds: 60,
    }
}

fn create_client(server: &MockServer) -> RecipesClient {
    RecipesClient::new(&create_test_config(&server.uri())).expect("client should build")
}

/// Backend recipe payload (camelCase wire format)
fn recipe_json(slug: &str) -> serde_json::Value {
    let locale = slug.split('-').next().unwrap_or("en");

    serde_json::json!({
        "id": format!("id-{}", slug),
        "slug": slug,
        "locale": locale,
        "title": format!("Recipe {}", slug),
        "description": "A test recipe.",
        "ingredients": ["2 cups flour", "1 cup water"],
        "steps": ["Mix everything", "Bake for 40 minutes"],
        "imagePath": format!("/images/{}.jpg", slug),
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-02-01T00:00:00Z"
    })
}

// ==================== Resolver Tests ====================

#[tokio::test]
async fn test_resolve_localizes_slug_before_direct_fetch() {
    let mock_server = MockServer::start().await;

    // The request asks for the French slug on the English route; only the
    // localized English slug exists on the backend.
    Mock::given(method("GET"))
        .and(path("/recipes/en-recipe-001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(recipe_json("en-recipe-001")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let resolution = resolve_for_locale(&client, "fr-recipe-001", Locale::ENGLISH)
        .await
        .expect("should resolve");

    assert!(resolution.is_exact());
    assert_eq!(resolution.recipe().slug, "en-recipe-001");
}

#[tokio::test]
async fn test_resolve_falls_back_to_same_index_in_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes/en-recipe-005"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/recipes"))
        .and(query_param("locale", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            recipe_json("en-recipe-003"),
            recipe_json("en-recipe-005"),
        ])))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let resolution = resolve_for_locale(&client, "fr-recipe-005", Locale::ENGLISH)
        .await
        .expect("should resolve");

    match resolution {
        Resolution::SameIndex(recipe) => assert_eq!(recipe.slug, "en-recipe-005"),
        other => panic!("expected SameIndex, got {:?}", other),
    }
}

#[tokio::test]
async fn test_resolve_returns_first_recipe_when_index_has_no_translation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes/en-recipe-005"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    // Other English recipes exist, but not index 005.
    Mock::given(method("GET"))
        .and(path("/recipes"))
        .and(query_param("locale", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            recipe_json("en-recipe-001"),
            recipe_json("en-recipe-002"),
        ])))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let resolution = resolve_for_locale(&client, "fr-recipe-005", Locale::ENGLISH)
        .await
        .expect("should resolve");

    match resolution {
        Resolution::FirstAvailable(recipe) => assert_eq!(recipe.slug, "en-recipe-001"),
        other => panic!("expected FirstAvailable, got {:?}", other),
    }
}

#[tokio::test]
async fn test_resolve_without_index_falls_back_to_first_recipe() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes/en-grandmas-tarte"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/recipes"))
        .and(query_param("locale", "en"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([recipe_json("en-recipe-001")])),
        )
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let resolution = resolve_for_locale(&client, "fr-grandmas-tarte", Locale::ENGLISH)
        .await
        .expect("should resolve");

    match resolution {
        Resolution::FirstAvailable(recipe) => assert_eq!(recipe.slug, "en-recipe-001"),
        other => panic!("expected FirstAvailable, got {:?}", other),
    }
}

#[tokio::test]
async fn test_resolve_not_found_when_locale_has_no_recipes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes/en-recipe-999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/recipes"))
        .and(query_param("locale", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let result = resolve_for_locale(&client, "en-recipe-999", Locale::ENGLISH).await;

    assert!(matches!(result, Err(ApiError::NotFound)));
}

#[tokio::test]
async fn test_resolve_transport_error_skips_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes/en-recipe-001"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({ "message": "database exploded" })),
        )
        .mount(&mock_server)
        .await;

    // Only a not-found may trigger the list fallback.
    Mock::given(method("GET"))
        .and(path("/recipes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let result = resolve_for_locale(&client, "en-recipe-001", Locale::ENGLISH).await;

    match result {
        Err(ApiError::Transport(message)) => assert!(message.contains("database exploded")),
        other => panic!("expected Transport error, got {:?}", other.map(|_| ())),
    }
}

// ==================== Seed Tests ====================

#[tokio::test]
async fn test_seed_sends_internal_api_key_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recipes/seed"))
        .and(header("x-internal-api-key", "test-internal-key"))
        .and(body_json(serde_json::json!({ "amount": 50 })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "seeded": 50, "amount": 50 })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let response = client
        .seed_recipes(MAX_SEED_AMOUNT)
        .await
        .expect("max amount should be accepted");

    assert_eq!(response.seeded, 50);
    assert_eq!(response.amount, 50);
}

#[tokio::test]
async fn test_seed_out_of_range_never_reaches_backend() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recipes/seed"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);

    for amount in [0, MAX_SEED_AMOUNT + 1] {
        let result = client.seed_recipes(amount).await;
        assert!(
            matches!(result, Err(ApiError::Validation(_))),
            "amount {} should be rejected locally",
            amount
        );
    }
}

#[tokio::test]
async fn test_seed_surfaces_backend_error_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recipes/seed"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(serde_json::json!({ "message": "Invalid internal API key." })),
        )
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let result = client.seed_recipes(10).await;

    match result {
        Err(ApiError::Transport(message)) => {
            assert!(message.contains("Invalid internal API key."));
        }
        other => panic!("expected Transport error, got {:?}", other.map(|_| ())),
    }
}

// ==================== Sitemap Tests ====================

#[tokio::test]
async fn test_sitemap_groups_locales_and_caches_rendered_xml() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            recipe_json("en-recipe-001"),
            recipe_json("fr-recipe-001"),
            recipe_json("fr-recipe-007"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = Arc::new(create_test_config(&mock_server.uri()));
    let client = Arc::new(RecipesClient::new(&config).expect("client should build"));
    let service = SitemapService::new(Arc::clone(&config), client);

    let xml = service.sitemap_xml().await;

    // Locale landing entry with alternates for every locale.
    assert!(xml.contains("<loc>https://recipes.example.com/en</loc>"));
    assert!(xml.contains(
        "<xhtml:link rel=\"alternate\" hreflang=\"fr\" href=\"https://recipes.example.com/fr\"/>"
    ));

    // Paired group: English slug is canonical, both locales alternate.
    assert!(xml.contains("<loc>https://recipes.example.com/en/recipes/en-recipe-001</loc>"));
    assert!(xml.contains(
        "<xhtml:link rel=\"alternate\" hreflang=\"fr\" \
         href=\"https://recipes.example.com/fr/recipes/fr-recipe-001\"/>"
    ));

    // French-only group falls back to the French slug as canonical.
    assert!(xml.contains("<loc>https://recipes.example.com/fr/recipes/fr-recipe-007</loc>"));
    assert!(xml.contains("<changefreq>daily</changefreq>"));
    assert!(xml.contains("<priority>0.8</priority>"));

    // Second request is served from the hour-long cache (backend expect(1)).
    let cached = service.sitemap_xml().await;
    assert_eq!(xml, cached);
}

#[tokio::test]
async fn test_sitemap_degrades_to_landing_only_on_backend_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = Arc::new(create_test_config(&mock_server.uri()));
    let client = Arc::new(RecipesClient::new(&config).expect("client should build"));
    let service = SitemapService::new(Arc::clone(&config), client);

    let xml = service.sitemap_xml().await;

    assert!(xml.contains("<loc>https://recipes.example.com/en</loc>"));
    assert!(!xml.contains("/recipes/"));
}

// ==================== Localization Properties ====================

mod localization_properties {
    use super::*;
    use proptest::prelude::*;

    fn any_locale() -> impl Strategy<Value = Locale> {
        prop_oneof![Just(Locale::ENGLISH), Just(Locale::FRENCH)]
    }

    proptest! {
        #[test]
        fn prop_relocalization_is_idempotent(
            index in 0u32..10_000,
            origin in any_locale(),
            intermediate in any_locale(),
            target in any_locale(),
        ) {
            let slug = build_slug(origin, index);

            // localize(localize(slug, L2), L1) == localize(slug, L1)
            let via_intermediate =
                localize_slug(&localize_slug(&slug, intermediate), target);
            prop_assert_eq!(via_intermediate, localize_slug(&slug, target));
        }

        #[test]
        fn prop_localize_own_locale_is_identity(
            index in 0u32..10_000,
            locale in any_locale(),
        ) {
            let slug = build_slug(locale, index);
            prop_assert_eq!(localize_slug(&slug, locale), slug);
        }
    }
}
