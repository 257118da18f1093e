//! # Casting Common Library
//!
//! Shared code for the casting catalog service:
//! - Sheet row normalization and the reverse mapping used on save
//! - Catalog filtering and search
//! - Client for the spreadsheet endpoint
//! - Configuration loading
//! - Date utilities

pub mod catalog;
pub mod config;
pub mod error;
pub mod profile;
pub mod sheets;
pub mod time;

pub use error::{Error, Result};
pub use profile::{Category, Location, NormalizedProfile, RawRow, RowRef};
