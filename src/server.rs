//! HTTP server: SSR page shells plus the built client bundle.
//!
//! Each page is rendered with Dioxus SSR and wrapped in a document that
//! carries two small inline scripts: the embedded theme config (read back by
//! the client) and a pre-paint boot script that sets the dark marker from
//! storage before any stylesheet applies.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use dioxus::prelude::*;
use serde::Serialize;
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use crate::app::pages::SitePage;
use crate::app::theme::ThemeRoot;
use crate::config::{Config, ThemeConfig, THEME_CONFIG_ELEMENT_ID};

#[derive(Clone)]
pub struct AppState {
    pub theme: Arc<ThemeConfig>,
}

impl AppState {
    pub fn new(theme: ThemeConfig) -> Self {
        Self {
            theme: Arc::new(theme),
        }
    }
}

/// Build the application router.
pub fn router(config: &Config) -> Router {
    let state = AppState::new(config.theme.clone());

    let mut app = Router::new()
        .route("/health", get(health_handler))
        .route("/", get(home_page))
        .route("/privacy", get(privacy_page))
        .route("/terms", get(terms_page))
        .route("/refund", get(refund_page))
        .with_state(state);

    if let Some(dir) = &config.assets_dir {
        tracing::info!("Serving client bundle from {}", dir.display());
        app = app.fallback_service(ServeDir::new(PathBuf::from(dir)));
    }

    app.layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    git_sha: &'static str,
}

/// GET /health
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("SITE_VERSION"),
        git_sha: env!("SITE_GIT_SHA"),
    })
}

/// GET /
async fn home_page(State(state): State<AppState>) -> impl IntoResponse {
    Html(render_page(SitePage::Home, &state.theme))
}

/// GET /privacy
async fn privacy_page(State(state): State<AppState>) -> impl IntoResponse {
    Html(render_page(SitePage::Privacy, &state.theme))
}

/// GET /terms
async fn terms_page(State(state): State<AppState>) -> impl IntoResponse {
    Html(render_page(SitePage::Terms, &state.theme))
}

/// GET /refund
async fn refund_page(State(state): State<AppState>) -> impl IntoResponse {
    Html(render_page(SitePage::Refund, &state.theme))
}

/// Render a full HTML document for one page.
pub fn render_page(page: SitePage, theme: &ThemeConfig) -> String {
    let body = dioxus::ssr::render_element(rsx! {
        ThemeRoot { {page.render()} }
    });

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <script id=\"{id}\" type=\"application/json\">{config}</script>\n\
         <script>{boot}</script>\n\
         </head>\n<body>\n<div id=\"main\">{body}</div>\n</body>\n</html>",
        id = THEME_CONFIG_ELEMENT_ID,
        config = theme_config_json(theme),
        boot = theme_boot_script(theme),
    )
}

/// Theme config as JSON that is safe inside a `<script>` element.
pub fn theme_config_json(theme: &ThemeConfig) -> String {
    serde_json::to_string(theme)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/")
}

/// Inline script applying the stored or system theme before first paint.
///
/// Mirrors the controller's resolution rule: "dark" -> dark, "light" ->
/// light, anything else follows the media query. Storage faults fall through
/// to the media query; a missing matchMedia means light.
pub fn theme_boot_script(theme: &ThemeConfig) -> String {
    let js = |s: &str| {
        serde_json::to_string(s)
            .unwrap_or_else(|_| "\"\"".to_string())
            .replace("</", "<\\/")
    };
    format!(
        "(function(){{var t=null;try{{t=localStorage.getItem({key});}}catch(e){{}}\
         var d=t==='dark'||(t!=='light'&&!!window.matchMedia&&window.matchMedia({query}).matches);\
         document.documentElement.classList.toggle({class},d);}})();",
        key = js(&theme.storage_key),
        query = js(&theme.media_query),
        class = js(&theme.dark_class),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_script_uses_configured_names() {
        let theme = ThemeConfig {
            storage_key: "site-theme".to_string(),
            dark_class: "theme-dark".to_string(),
            ..ThemeConfig::default()
        };
        let script = theme_boot_script(&theme);
        assert!(script.contains(r#"localStorage.getItem("site-theme")"#));
        assert!(script.contains(r#"classList.toggle("theme-dark",d)"#));
        assert!(script.contains(r#"matchMedia("(prefers-color-scheme: dark)")"#));
    }

    #[test]
    fn test_config_json_cannot_close_script() {
        let theme = ThemeConfig {
            storage_key: "</script><script>alert(1)".to_string(),
            ..ThemeConfig::default()
        };
        let json = theme_config_json(&theme);
        assert!(!json.contains("</script>"));
        let back: ThemeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.storage_key, theme.storage_key);
    }

    #[test]
    fn test_render_page_contains_theme_controls() {
        let html = render_page(SitePage::Privacy, &ThemeConfig::default());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"id="theme-config""#));
        assert!(html.contains("Privacy Policy"));
        assert!(html.contains("theme-switcher"));
        // Server renders as "system" until the client takes over
        assert!(html.contains(r#"id="theme-system""#));
        assert!(html.contains(r#"aria-pressed="true""#));
    }
}
