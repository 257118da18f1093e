//! Public catalog API with filters and "load more" pagination
//!
//! Every request fetches and normalizes the full row set, then filters it
//! in memory. A failed fetch is not an HTTP error: the page gets an empty
//! catalog plus the message to show.

use axum::{
    extract::{Query, State},
    Json,
};
use casting_common::catalog::{distinct_genders, shuffle_seeded, CatalogFilter};
use casting_common::{Category, Location, NormalizedProfile};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::pagination::{calculate_window, PAGE_SIZE};
use crate::AppState;

/// Query parameters for the catalog
///
/// `location`, `category` and `gender` take comma-separated values.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub search: String,

    #[serde(default)]
    pub location: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub gender: String,

    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: usize,

    /// Shuffle seed; absent keeps endpoint order
    pub seed: Option<u64>,
}

fn default_page() -> usize {
    1
}

impl CatalogQuery {
    pub fn filter(&self) -> CatalogFilter {
        CatalogFilter {
            search: self.search.clone(),
            locations: parse_list(&self.location),
            categories: parse_list(&self.category),
            genders: split_list(&self.gender).map(str::to_string).collect(),
        }
    }
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|v| !v.is_empty())
}

/// Parse each listed value, dropping the ones that are not recognized
fn parse_list<T: FromStr>(value: &str) -> Vec<T> {
    split_list(value)
        .filter_map(|item| match item.parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                debug!("Ignoring unknown filter value '{}'", item);
                None
            }
        })
        .collect()
}

/// Catalog response
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub profiles: Vec<NormalizedProfile>,
    /// Gender facet over the whole catalog, not just the filtered part
    pub genders: Vec<String>,
    pub locations: Vec<Location>,
    pub categories: Vec<Category>,
    pub total_results: usize,
    pub visible: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub warnings: Vec<String>,
}

impl CatalogResponse {
    fn failed(message: String) -> Self {
        Self {
            profiles: Vec::new(),
            genders: Vec::new(),
            locations: Location::ALL.to_vec(),
            categories: Category::ALL.to_vec(),
            total_results: 0,
            visible: 0,
            page: 1,
            page_size: PAGE_SIZE,
            total_pages: 0,
            has_more: false,
            error: Some(message),
            warnings: Vec::new(),
        }
    }
}

/// GET /api/profiles
///
/// Query params: `search`, `location`, `category`, `gender`, `page`, `seed`
pub async fn list_profiles(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Json<CatalogResponse> {
    let client = match state.sheets() {
        Ok(client) => client,
        Err(reason) => return Json(CatalogResponse::failed(reason.to_string())),
    };

    let set = match client.fetch_profiles().await {
        Ok(set) => set,
        Err(e) => {
            warn!("Catalog fetch failed: {}", e);
            return Json(CatalogResponse::failed(e.user_message()));
        }
    };

    let mut profiles = set.profiles;
    if let Some(seed) = query.seed {
        shuffle_seeded(&mut profiles, seed);
    }

    let genders = distinct_genders(&profiles);
    let filtered = query.filter().apply(&profiles);
    let window = calculate_window(filtered.len(), query.page);

    debug!(
        total = profiles.len(),
        matched = filtered.len(),
        visible = window.visible,
        "Catalog query"
    );

    Json(CatalogResponse {
        total_results: filtered.len(),
        profiles: filtered
            .into_iter()
            .take(window.visible)
            .cloned()
            .collect(),
        genders,
        locations: Location::ALL.to_vec(),
        categories: Category::ALL.to_vec(),
        visible: window.visible,
        page: window.page,
        page_size: PAGE_SIZE,
        total_pages: window.total_pages,
        has_more: window.has_more,
        error: None,
        warnings: set.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_comma_lists() {
        let query = CatalogQuery {
            search: "ana".to_string(),
            location: "Punta del Este, Salto".to_string(),
            category: "actores,MENORES,,".to_string(),
            gender: "Femenino, Otro".to_string(),
            ..Default::default()
        };

        let filter = query.filter();
        assert_eq!(filter.search, "ana");
        assert_eq!(filter.locations, vec![Location::PuntaDelEste]);
        assert_eq!(filter.categories, vec![Category::Actores, Category::Menores]);
        assert_eq!(filter.genders, vec!["Femenino".to_string(), "Otro".to_string()]);
    }

    #[test]
    fn test_empty_query_is_empty_filter() {
        assert!(CatalogQuery::default().filter().is_empty());
    }

    #[test]
    fn test_failed_response_shape() {
        let response = CatalogResponse::failed("sin datos".to_string());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error"], "sin datos");
        assert_eq!(json["profiles"].as_array().unwrap().len(), 0);
        assert_eq!(json["page_size"], 24);
    }
}
