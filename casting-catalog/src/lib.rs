//! casting-catalog library - talent catalog and admin editor service
//!
//! Serves the public catalog page, the admin editor page and the JSON API
//! behind them. Rows come from the external sheets endpoint on every
//! request; nothing is stored.

use axum::Router;
use casting_common::config::ServiceConfig;
use casting_common::sheets::SheetsClient;
use tower_http::trace::TraceLayer;
use tracing::warn;

pub mod api;
pub mod pagination;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    sheets: Option<SheetsClient>,
    /// Why `sheets` is absent; reported by every data route
    setup_error: String,
}

impl AppState {
    /// State backed by a working endpoint client
    pub fn new(sheets: SheetsClient) -> Self {
        Self {
            sheets: Some(sheets),
            setup_error: String::new(),
        }
    }

    /// State with no endpoint; data routes answer with `reason`
    pub fn unconfigured(reason: impl Into<String>) -> Self {
        Self {
            sheets: None,
            setup_error: reason.into(),
        }
    }

    /// Build state from resolved configuration
    ///
    /// A missing or unusable endpoint URL is logged and kept as the
    /// error every data route reports; startup continues.
    pub fn from_config(config: &ServiceConfig) -> Self {
        match config.endpoint_url().and_then(|url| SheetsClient::new(url)) {
            Ok(client) => Self::new(client),
            Err(e) => {
                warn!("{}", e);
                Self::unconfigured(e.to_string())
            }
        }
    }

    /// Endpoint client, or the configuration error message
    pub fn sheets(&self) -> Result<&SheetsClient, &str> {
        self.sheets.as_ref().ok_or(self.setup_error.as_str())
    }
}

/// Build application router
///
/// Admin routes sit behind the admin-secret middleware; pages, health
/// and the public catalog do not.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, post};

    // Protected routes (require X-Admin-Secret)
    let protected = Router::new()
        .route("/api/admin/profiles", get(api::list_admin_profiles))
        .route("/api/admin/profiles/:id", post(api::save_profile))
        .layer(middleware::from_fn(api::admin_secret_middleware));

    // Public routes
    let public = Router::new()
        .route("/", get(api::serve_index))
        .route("/admin", get(api::serve_admin))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/static/admin.js", get(api::serve_admin_js))
        .route("/static/style.css", get(api::serve_style_css))
        .route("/api/buildinfo", get(api::get_build_info))
        .route("/api/profiles", get(api::list_profiles))
        .merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
