//! Security tests for casting-catalog
//!
//! Tests security-critical features:
//! - Oversized save bodies are rejected before reaching the endpoint
//! - The admin secret is forwarded exactly, including Latin-1 characters
//! - The raw sheet row is never serialized to any client

use axum::{
    body::Body,
    http::{HeaderValue, Request, StatusCode},
    routing::get,
    Json, Router,
};
use casting_catalog::{build_router, AppState};
use casting_common::sheets::SheetsClient;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;

/// Test helper: Mock endpoint with one row; returns its URL and the
/// update bodies it received
async fn spawn_endpoint() -> (String, Arc<Mutex<Vec<Value>>>) {
    let saves = Arc::new(Mutex::new(Vec::new()));
    let log = saves.clone();

    let app = Router::new().route(
        "/exec",
        get(|| async {
            Json(json!({
                "profiles": [{
                    "location": "Montevideo",
                    "category": "CASTING",
                    "rowRef": {"sheetKey": "mvd_casting", "rowIndex": 7},
                    "raw": {
                        "NOMBRES": "Diego",
                        "DOMICILIO": "Calle Falsa 123",
                        "CEDULA DE IDENTIDAD (SIN PUNTOS NI GUIONES)": "12345678"
                    }
                }]
            }))
        })
        .post(move |body: String| {
            let log = log.clone();
            async move {
                log.lock().unwrap().push(serde_json::from_str::<Value>(&body).unwrap());
                "OK"
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/exec", addr), saves)
}

fn setup_app(url: &str) -> Router {
    build_router(AppState::new(SheetsClient::new(url).unwrap()))
}

// =============================================================================
// Body Size Limit
// =============================================================================

/// Save bodies above axum's default 2MB JSON limit are refused
#[tokio::test]
async fn test_oversized_save_body_rejected() {
    let (url, saves) = spawn_endpoint().await;
    let app = setup_app(&url);

    let huge = "x".repeat(3 * 1024 * 1024);
    let request = Request::builder()
        .method("POST")
        .uri("/api/admin/profiles/Montevideo-CASTING-mvd_casting-7")
        .header("X-Admin-Secret", "clave")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "notes": huge }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(saves.lock().unwrap().is_empty());
}

// =============================================================================
// Admin Secret Forwarding
// =============================================================================

#[tokio::test]
async fn test_latin1_secret_forwarded_intact() {
    let (url, saves) = spawn_endpoint().await;
    let app = setup_app(&url);

    // "contraseña" as a browser sends it: one byte per Latin-1 character
    let secret = HeaderValue::from_bytes(b"contrase\xf1a").unwrap();
    let request = Request::builder()
        .method("POST")
        .uri("/api/admin/profiles/Montevideo-CASTING-mvd_casting-7")
        .header("X-Admin-Secret", secret)
        .header("content-type", "application/json")
        .body(Body::from(r#"{"email":"diego@example.com"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let saves = saves.lock().unwrap();
    assert_eq!(saves[0]["adminSecret"], "contraseña");
}

#[tokio::test]
async fn test_secret_is_trimmed() {
    let (url, saves) = spawn_endpoint().await;
    let app = setup_app(&url);

    let request = Request::builder()
        .method("POST")
        .uri("/api/admin/profiles/Montevideo-CASTING-mvd_casting-7")
        .header("X-Admin-Secret", "  clave  ")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"email":"diego@example.com"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(saves.lock().unwrap()[0]["adminSecret"], "clave");
}

// =============================================================================
// Raw Row Exposure
// =============================================================================

#[tokio::test]
async fn test_raw_row_never_serialized() {
    let (url, _) = spawn_endpoint().await;
    let app = setup_app(&url);

    for uri in ["/api/profiles", "/api/admin/profiles"] {
        let request = Request::builder()
            .uri(uri)
            .header("X-Admin-Secret", "clave")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();

        assert!(text.contains("Diego"), "{}", uri);
        assert!(!text.contains("12345678"), "{} leaked identity number", uri);
        assert!(!text.contains("Calle Falsa"), "{} leaked address", uri);
    }
}
