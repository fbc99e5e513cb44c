//! Server-rendered HTML for the localized pages.
//!
//! Responsibilities:
//! - Render the locale landing page (recipe cards, seed form, sitemap
//!   preview panel, language switcher) and the recipe detail page.
//! - Emit the SEO `<head>` block: title, description, canonical link,
//!   hreflang alternates, Open Graph and Twitter card tags.
//! - Keep every dynamic value HTML-escaped.

use crate::config::Config;
use crate::i18n::{Locale, UiStrings};
use crate::preview::PreviewSnapshot;
use crate::recipes::{Recipe, Resolution, MAX_SEED_AMOUNT};
use crate::seo::{absolute_url, locale_alternates, og_alternate_locales, recipe_image_url};
use crate::sitemap::recipe_path;
use crate::slug::localize_slug;

/// Escape text for HTML element and attribute content.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Metadata rendered into a page's `<head>` block.
#[derive(Debug, Clone)]
pub struct HeadMeta {
    pub title: String,
    pub description: String,
    /// Site-relative canonical path; omitted for degraded pages.
    pub canonical: Option<String>,
    /// Site-relative hreflang alternates, one per locale.
    pub alternates: Vec<(Locale, String)>,
    /// Site-relative `x-default` target.
    pub x_default: Option<String>,
    pub og_type: &'static str,
    pub og_locale: &'static str,
    pub og_image: Option<String>,
    /// Ask crawlers not to index this page (missing recipe variants).
    pub noindex: bool,
}

impl HeadMeta {
    /// Metadata for the locale landing page.
    pub fn landing(locale: Locale) -> HeadMeta {
        let strings = UiStrings::for_locale(locale);

        HeadMeta {
            title: strings.site_name.to_string(),
            description: strings.site_tagline.to_string(),
            canonical: Some(format!("/{}", locale.code())),
            alternates: locale_alternates(|alternate| format!("/{}", alternate.code())),
            x_default: Some(format!("/{}", Locale::default_locale().code())),
            og_type: "website",
            og_locale: locale.og_code(),
            og_image: None,
            noindex: false,
        }
    }

    /// Metadata for a resolved recipe detail page.
    pub fn recipe(config: &Config, locale: Locale, recipe: &Recipe) -> HeadMeta {
        let strings = UiStrings::for_locale(locale);
        let default_locale = Locale::default_locale();

        HeadMeta {
            title: format!("{} | {}", recipe.title, strings.site_name),
            description: recipe.description.clone(),
            canonical: Some(recipe_path(locale, &recipe.slug)),
            alternates: locale_alternates(|alternate| recipe_path(alternate, &recipe.slug)),
            // Explicit default locale for crawlers that do not match hreflang.
            x_default: Some(format!(
                "/{}/recipes/{}",
                default_locale.code(),
                localize_slug(&recipe.slug, default_locale)
            )),
            og_type: "article",
            og_locale: locale.og_code(),
            og_image: Some(recipe_image_url(config, &recipe.image_path)),
            noindex: false,
        }
    }

    /// Degraded metadata when no recipe could be fetched: localized
    /// not-found title, no canonical, no alternates, noindex.
    pub fn recipe_missing(locale: Locale) -> HeadMeta {
        let strings = UiStrings::for_locale(locale);

        HeadMeta {
            title: strings.recipe_not_found.to_string(),
            description: strings.site_tagline.to_string(),
            canonical: None,
            alternates: Vec::new(),
            x_default: None,
            og_type: "website",
            og_locale: locale.og_code(),
            og_image: None,
            noindex: true,
        }
    }
}

fn render_head(config: &Config, locale: Locale, meta: &HeadMeta) -> String {
    let mut head = String::new();

    head.push_str(&format!("<title>{}</title>\n", escape_html(&meta.title)));
    head.push_str(&format!(
        "<meta name=\"description\" content=\"{}\">\n",
        escape_html(&meta.description)
    ));

    if meta.noindex {
        // Avoid indexing missing variants while still allowing crawl discovery.
        head.push_str("<meta name=\"robots\" content=\"noindex, follow\">\n");
    } else {
        head.push_str("<meta name=\"robots\" content=\"index, follow\">\n");
    }

    if let Some(canonical) = &meta.canonical {
        head.push_str(&format!(
            "<link rel=\"canonical\" href=\"{}\">\n",
            escape_html(&absolute_url(config, canonical))
        ));
    }

    for (alternate, path) in &meta.alternates {
        head.push_str(&format!(
            "<link rel=\"alternate\" hreflang=\"{}\" href=\"{}\">\n",
            alternate.code(),
            escape_html(&absolute_url(config, path))
        ));
    }

    if let Some(x_default) = &meta.x_default {
        head.push_str(&format!(
            "<link rel=\"alternate\" hreflang=\"x-default\" href=\"{}\">\n",
            escape_html(&absolute_url(config, x_default))
        ));
    }

    head.push_str(&format!("<meta property=\"og:type\" content=\"{}\">\n", meta.og_type));
    head.push_str(&format!(
        "<meta property=\"og:locale\" content=\"{}\">\n",
        meta.og_locale
    ));
    for og_alternate in og_alternate_locales(locale) {
        head.push_str(&format!(
            "<meta property=\"og:locale:alternate\" content=\"{}\">\n",
            og_alternate
        ));
    }
    head.push_str(&format!(
        "<meta property=\"og:title\" content=\"{}\">\n",
        escape_html(&meta.title)
    ));
    head.push_str(&format!(
        "<meta property=\"og:description\" content=\"{}\">\n",
        escape_html(&meta.description)
    ));
    if let Some(canonical) = &meta.canonical {
        head.push_str(&format!(
            "<meta property=\"og:url\" content=\"{}\">\n",
            escape_html(&absolute_url(config, canonical))
        ));
    }
    if let Some(image) = &meta.og_image {
        head.push_str(&format!(
            "<meta property=\"og:image\" content=\"{}\">\n",
            escape_html(image)
        ));
        head.push_str("<meta name=\"twitter:card\" content=\"summary_large_image\">\n");
        head.push_str(&format!(
            "<meta name=\"twitter:image\" content=\"{}\">\n",
            escape_html(image)
        ));
    } else {
        head.push_str("<meta name=\"twitter:card\" content=\"summary\">\n");
    }

    head
}

/// Wrap a body in the full HTML document shell.
fn render_layout(config: &Config, locale: Locale, meta: &HeadMeta, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         {head}</head>\n<body>\n{body}\n</body>\n</html>\n",
        lang = locale.code(),
        head = render_head(config, locale, meta),
        body = body
    )
}

/// Links to the current page in every other locale.
fn language_switcher(current: Locale, path_for: impl Fn(Locale) -> String) -> String {
    let mut nav = String::from("<nav class=\"language-switcher\">\n");

    for (locale, path) in locale_alternates(path_for) {
        if locale == current {
            nav.push_str(&format!(
                "  <span aria-current=\"true\">{}</span>\n",
                escape_html(locale.native_name())
            ));
        } else {
            nav.push_str(&format!(
                "  <a href=\"{}\" lang=\"{}\">{}</a>\n",
                escape_html(&path),
                locale.code(),
                escape_html(locale.native_name())
            ));
        }
    }

    nav.push_str("</nav>\n");
    nav
}

fn error_panel(message: &str) -> String {
    format!(
        "<div class=\"error-panel\" role=\"alert\">{}</div>\n",
        escape_html(message)
    )
}

fn seed_form(locale: Locale) -> String {
    let strings = UiStrings::for_locale(locale);

    format!(
        "<form id=\"seed-form\" data-max=\"{max}\" \
         data-success=\"{success}\" data-failed=\"{failed}\" data-range=\"{range}\">\n\
         <label>{label}\n\
         <input type=\"number\" name=\"amount\" min=\"1\" max=\"{max}\" value=\"10\">\n\
         </label>\n\
         <button type=\"submit\">{submit}</button>\n\
         <p class=\"hint\">{hint}</p>\n\
         <p id=\"seed-message\" role=\"status\"></p>\n\
         </form>\n",
        max = MAX_SEED_AMOUNT,
        success = escape_html(strings.seed_success),
        failed = escape_html(strings.seed_failed),
        range = escape_html(&strings.seed_range.replace("{max}", &MAX_SEED_AMOUNT.to_string())),
        label = escape_html(strings.seed_amount_label),
        submit = escape_html(strings.seed_now),
        hint = escape_html(&strings.seed_limit_hint.replace("{max}", &MAX_SEED_AMOUNT.to_string())),
    )
}

/// Client script for the seed form and the live preview panel. Kept
/// dependency-free: one JSON POST for seeding, one per-second poll of the
/// preview endpoint.
const PAGE_SCRIPT: &str = r#"<script>
(function () {
  var form = document.getElementById("seed-form");
  if (form) {
    form.addEventListener("submit", function (event) {
      event.preventDefault();
      var message = document.getElementById("seed-message");
      var amount = Number(form.elements.amount.value);
      var max = Number(form.dataset.max);
      if (!Number.isInteger(amount) || amount < 1 || amount > max) {
        message.textContent = form.dataset.range;
        return;
      }
      message.textContent = "";
      fetch("/api/seed", {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify({ amount: amount })
      })
        .then(function (response) {
          return response.json().then(function (body) {
            if (!response.ok) throw new Error(body.message || form.dataset.failed);
            message.textContent = form.dataset.success
              .replace("{seeded}", body.seeded)
              .replace("{amount}", body.amount);
          });
        })
        .catch(function (error) {
          message.textContent = error.message || form.dataset.failed;
        });
    });
  }

  var panel = document.getElementById("sitemap-preview");
  if (panel) {
    var status = panel.querySelector("[data-status]");
    var output = panel.querySelector("pre");
    window.setInterval(function () {
      fetch("/api/sitemap-preview")
        .then(function (response) { return response.json(); })
        .then(function (state) {
          status.textContent = state.refreshing
            ? status.dataset.revalidating
            : status.dataset.countdown.replace("{seconds}", state.secondsRemaining);
          if (state.sitemapXml) output.textContent = state.sitemapXml;
        })
        .catch(function () { /* transient poll failures keep the last state */ });
    }, 1000);
  }
})();
</script>
"#;

fn preview_panel(locale: Locale, snapshot: &PreviewSnapshot) -> String {
    let strings = UiStrings::for_locale(locale);

    let status = if snapshot.refreshing {
        strings.sitemap_revalidating.to_string()
    } else {
        strings
            .sitemap_countdown
            .replace("{seconds}", &snapshot.seconds_remaining.to_string())
    };

    let content = match &snapshot.sitemap_xml {
        Some(xml) => escape_html(xml),
        None => escape_html(strings.sitemap_loading),
    };

    format!(
        "<section id=\"sitemap-preview\">\n\
         <h3>{title}</h3>\n\
         <p class=\"hint\">{hint}</p>\n\
         <p data-status data-countdown=\"{countdown}\" data-revalidating=\"{revalidating}\">{status}</p>\n\
         <pre><code>{content}</code></pre>\n\
         </section>\n",
        title = escape_html(strings.sitemap_preview_title),
        hint = escape_html(strings.sitemap_preview_hint),
        countdown = escape_html(strings.sitemap_countdown),
        revalidating = escape_html(strings.sitemap_revalidating),
        status = escape_html(&status),
        content = content,
    )
}

fn recipe_card(config: &Config, locale: Locale, recipe: &Recipe) -> String {
    let strings = UiStrings::for_locale(locale);
    let href = recipe_path(locale, &recipe.slug);

    format!(
        "<article class=\"recipe-card\">\n\
         <img src=\"{image}\" alt=\"{title}\" loading=\"lazy\">\n\
         <h2><a href=\"{href}\">{title}</a></h2>\n\
         <p>{description}</p>\n\
         <a href=\"{href}\">{read}</a>\n\
         </article>\n",
        image = escape_html(&recipe_image_url(config, &recipe.image_path)),
        title = escape_html(&recipe.title),
        href = escape_html(&href),
        description = escape_html(&recipe.description),
        read = escape_html(strings.read_recipe),
    )
}

/// Locale landing page: hero, seed form, recipe cards, sitemap preview.
///
/// A backend failure renders as an inline error panel in place of the card
/// grid; the rest of the page (and its metadata) stays intact.
pub fn landing_page(
    config: &Config,
    locale: Locale,
    recipes: Result<&[Recipe], &str>,
    snapshot: &PreviewSnapshot,
) -> String {
    let strings = UiStrings::for_locale(locale);
    let mut body = String::new();

    body.push_str("<main class=\"recipe-shell\">\n<header>\n");
    body.push_str(&format!(
        "<span class=\"badge\">{}</span>\n",
        escape_html(strings.journal_badge)
    ));
    body.push_str(&format!("<h1>{}</h1>\n", escape_html(strings.site_name)));
    body.push_str(&format!("<p>{}</p>\n", escape_html(strings.site_tagline)));
    body.push_str(&format!(
        "<p class=\"notice\">{}</p>\n",
        escape_html(strings.data_notice)
    ));
    body.push_str(&seed_form(locale));
    body.push_str(&language_switcher(locale, |alternate| {
        format!("/{}", alternate.code())
    }));
    body.push_str("</header>\n");

    match recipes {
        Ok(recipes) if recipes.is_empty() => {
            body.push_str(&format!(
                "<p class=\"empty\">{}</p>\n",
                escape_html(strings.recipes_empty)
            ));
        }
        Ok(recipes) => {
            body.push_str("<section class=\"recipe-grid\">\n");
            for recipe in recipes {
                body.push_str(&recipe_card(config, locale, recipe));
            }
            body.push_str("</section>\n");
        }
        Err(message) => {
            body.push_str(&error_panel(message));
        }
    }

    body.push_str(&preview_panel(locale, snapshot));
    body.push_str(PAGE_SCRIPT);
    body.push_str("</main>");

    render_layout(config, locale, &HeadMeta::landing(locale), &body)
}

/// Recipe detail page for a resolved recipe.
///
/// When the resolution is a fallback, a notice banner links to the
/// canonical URL of the recipe actually shown.
pub fn recipe_page(config: &Config, locale: Locale, resolution: &Resolution) -> String {
    let strings = UiStrings::for_locale(locale);
    let recipe = resolution.recipe();
    let mut body = String::new();

    body.push_str("<main class=\"recipe-shell\">\n");
    body.push_str(&format!(
        "<a class=\"back\" href=\"/{}\">{}</a>\n",
        locale.code(),
        escape_html(strings.back_to_recipes)
    ));
    body.push_str(&language_switcher(locale, |alternate| {
        recipe_path(alternate, &recipe.slug)
    }));

    if !resolution.is_exact() {
        body.push_str(&format!(
            "<div class=\"fallback-notice\" role=\"note\">{} <a href=\"{}\">{}</a></div>\n",
            escape_html(strings.fallback_notice),
            escape_html(&recipe_path(locale, &recipe.slug)),
            escape_html(&recipe.title),
        ));
    }

    body.push_str("<article class=\"recipe-detail\">\n");
    body.push_str(&format!(
        "<img src=\"{}\" alt=\"{}\">\n",
        escape_html(&recipe_image_url(config, &recipe.image_path)),
        escape_html(&recipe.title)
    ));
    body.push_str(&format!("<h1>{}</h1>\n", escape_html(&recipe.title)));
    body.push_str(&format!("<p>{}</p>\n", escape_html(&recipe.description)));

    body.push_str(&format!(
        "<h2>{}</h2>\n<ul class=\"ingredients\">\n",
        escape_html(strings.ingredients_heading)
    ));
    for ingredient in &recipe.ingredients {
        body.push_str(&format!("  <li>{}</li>\n", escape_html(ingredient)));
    }
    body.push_str("</ul>\n");

    body.push_str(&format!(
        "<h2>{}</h2>\n<ol class=\"steps\">\n",
        escape_html(strings.steps_heading)
    ));
    for step in &recipe.steps {
        body.push_str(&format!("  <li>{}</li>\n", escape_html(step)));
    }
    body.push_str("</ol>\n");

    body.push_str("</article>\n</main>");

    render_layout(config, locale, &HeadMeta::recipe(config, locale, recipe), &body)
}

/// 404 page for a recipe that no fallback step could produce.
pub fn recipe_not_found_page(config: &Config, locale: Locale) -> String {
    let strings = UiStrings::for_locale(locale);

    let body = format!(
        "<main class=\"recipe-shell\">\n\
         <h1>{}</h1>\n\
         <a class=\"back\" href=\"/{}\">{}</a>\n\
         </main>",
        escape_html(strings.recipe_not_found),
        locale.code(),
        escape_html(strings.back_to_recipes),
    );

    render_layout(config, locale, &HeadMeta::recipe_missing(locale), &body)
}

/// Detail page shell with an inline error panel for transport failures.
pub fn recipe_error_page(config: &Config, locale: Locale, message: &str) -> String {
    let strings = UiStrings::for_locale(locale);

    let body = format!(
        "<main class=\"recipe-shell\">\n\
         <a class=\"back\" href=\"/{}\">{}</a>\n\
         {}</main>",
        locale.code(),
        escape_html(strings.back_to_recipes),
        error_panel(message),
    );

    render_layout(config, locale, &HeadMeta::recipe_missing(locale), &body)
}
