//! Admin editor API
//!
//! The list route returns every profile with its contact fields for the
//! editor. Saving re-reads the rows so the edits are mapped against the
//! row as it is in the sheet now, then sends one update to the endpoint.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use casting_common::catalog::admin_search;
use casting_common::profile::{build_updates, ColumnUpdates, ProfileEdits};
use casting_common::NormalizedProfile;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use super::auth::AdminSecret;
use crate::AppState;

/// Query parameters for the admin list
#[derive(Debug, Default, Deserialize)]
pub struct AdminQuery {
    #[serde(default)]
    pub search: String,
}

/// Admin list entry: the profile plus its editable values
#[derive(Debug, Serialize)]
pub struct AdminProfile {
    #[serde(flatten)]
    pub profile: NormalizedProfile,
    pub editable: ProfileEdits,
}

/// Admin list response
#[derive(Debug, Serialize)]
pub struct AdminListResponse {
    pub profiles: Vec<AdminProfile>,
    pub total_results: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub warnings: Vec<String>,
}

impl AdminListResponse {
    fn failed(message: String) -> Self {
        Self {
            profiles: Vec::new(),
            total_results: 0,
            error: Some(message),
            warnings: Vec::new(),
        }
    }
}

/// GET /api/admin/profiles
///
/// Requires `X-Admin-Secret`. Searches name, city, email and phones.
pub async fn list_admin_profiles(
    State(state): State<AppState>,
    Query(query): Query<AdminQuery>,
) -> Json<AdminListResponse> {
    let client = match state.sheets() {
        Ok(client) => client,
        Err(reason) => return Json(AdminListResponse::failed(reason.to_string())),
    };

    let set = match client.fetch_profiles().await {
        Ok(set) => set,
        Err(e) => {
            warn!("Admin fetch failed: {}", e);
            return Json(AdminListResponse::failed(e.user_message()));
        }
    };

    let profiles: Vec<AdminProfile> = admin_search(&set.profiles, &query.search)
        .into_iter()
        .map(|profile| AdminProfile {
            editable: ProfileEdits::from_profile(profile),
            profile: profile.clone(),
        })
        .collect();

    Json(AdminListResponse {
        total_results: profiles.len(),
        profiles,
        error: None,
        warnings: set.warnings,
    })
}

/// Save response
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub status: &'static str,
    /// Exact columns written, for the editor to confirm
    pub updates: ColumnUpdates,
}

/// POST /api/admin/profiles/:id
///
/// Body holds the edited fields; absent fields are left alone.
pub async fn save_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(AdminSecret(secret)): Extension<AdminSecret>,
    Json(edits): Json<ProfileEdits>,
) -> Result<Json<SaveResponse>, SaveError> {
    if edits.is_empty() {
        return Err(SaveError::NoChanges);
    }

    let client = state
        .sheets()
        .map_err(|reason| SaveError::NotConfigured(reason.to_string()))?;

    let set = client
        .fetch_profiles()
        .await
        .map_err(|e| SaveError::Endpoint(e.user_message()))?;

    let profile = set
        .profiles
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| SaveError::NotFound(id.clone()))?;

    let updates = build_updates(&profile.raw, &edits);

    client
        .update_row(&profile.row_ref, &updates, &secret)
        .await
        .map_err(|e| {
            warn!("Save of {} failed: {}", id, e);
            SaveError::Endpoint(e.user_message())
        })?;

    info!(id = %id, columns = updates.len(), "Profile saved");

    Ok(Json(SaveResponse {
        status: "saved",
        updates,
    }))
}

/// Save API errors
#[derive(Debug)]
pub enum SaveError {
    NoChanges,
    NotFound(String),
    NotConfigured(String),
    Endpoint(String),
}

impl IntoResponse for SaveError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            SaveError::NoChanges => (StatusCode::BAD_REQUEST, "No fields to save".to_string()),
            SaveError::NotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Profile not found: {}", id))
            }
            SaveError::NotConfigured(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            SaveError::Endpoint(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
