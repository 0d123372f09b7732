//! HTTP routing tests for the page server.

#![cfg(feature = "server")]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use site_frontend::app::pages::SitePage;
use site_frontend::config::{Config, ThemeConfig};
use site_frontend::server::router;

fn test_config(assets_dir: Option<std::path::PathBuf>) -> Config {
    Config {
        port: 0,
        assets_dir,
        theme: ThemeConfig::default(),
    }
}

async fn get(app: axum::Router, path: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

#[tokio::test]
async fn test_every_page_renders_with_boot_script() {
    for page in SitePage::ALL {
        let (status, body) = get(router(&test_config(None)), page.path()).await;
        assert_eq!(status, StatusCode::OK, "GET {}", page.path());
        assert!(body.contains("localStorage.getItem(\"theme\")"), "boot script on {}", page.path());
        assert!(body.contains(r#"<script id="theme-config" type="application/json">"#));
        assert!(body.contains("theme-toggle"));
    }
}

#[tokio::test]
async fn test_active_nav_item_marked() {
    let (_, body) = get(router(&test_config(None)), "/terms").await;
    assert!(body.contains(r#"href="/terms" aria-current="page""#));
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(router(&test_config(None)), "/health").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_unknown_path_without_assets_is_404() {
    let (status, _) = get(router(&test_config(None)), "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_assets_dir_served_as_fallback() {
    let dir = tempfile::tempdir().expect("create temp dir");
    std::fs::write(dir.path().join("app.js"), "console.log('hi');").expect("write asset");

    let app = router(&test_config(Some(dir.path().to_path_buf())));
    let (status, body) = get(app, "/app.js").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("console.log"));
}
