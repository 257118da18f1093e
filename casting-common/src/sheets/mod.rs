//! External sheets endpoint: fetch all rows, update one row

pub mod client;
pub mod models;

pub use client::{SheetsClient, DEFAULT_SAVE_ERROR};
pub use models::{parse_fetch_response, FetchedRows, ProfileSet, SheetRow, UpdateRequest};
