//! HTTP API handlers for casting-catalog

pub mod admin;
pub mod auth;
pub mod buildinfo;
pub mod catalog;
pub mod health;
pub mod ui;

pub use admin::{list_admin_profiles, save_profile};
pub use auth::admin_secret_middleware;
pub use buildinfo::get_build_info;
pub use catalog::list_profiles;
pub use health::health_routes;
pub use ui::{serve_admin, serve_admin_js, serve_app_js, serve_index, serve_style_css};
