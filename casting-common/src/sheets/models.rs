//! Wire types for the sheets endpoint
//!
//! The endpoint is a spreadsheet script, so the payload is loosely typed:
//! cells may arrive as numbers or booleans, row references may be missing,
//! and any entry may name a location or category this catalog does not
//! serve. Parsing here never rejects the whole payload for one bad entry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::profile::{
    normalize_profile_at, Category, ColumnUpdates, Location, NormalizedProfile, RawRow, RowRef,
};
use crate::{Error, Result};

/// One sheet row as delivered by the endpoint, with its placement
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub location: Location,
    pub category: Category,
    pub row_ref: RowRef,
    pub raw: RawRow,
}

/// Parsed GET response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedRows {
    pub rows: Vec<SheetRow>,
    /// Advisory messages from the endpoint and about skipped entries
    pub warnings: Vec<String>,
}

/// Normalized catalog plus the advisories gathered while loading it
#[derive(Debug, Clone, Default)]
pub struct ProfileSet {
    pub profiles: Vec<NormalizedProfile>,
    pub warnings: Vec<String>,
}

impl FetchedRows {
    /// Normalize every row, computing ages as of `today`
    pub fn normalize(self, today: NaiveDate) -> ProfileSet {
        let profiles = self
            .rows
            .into_iter()
            .map(|row| {
                normalize_profile_at(
                    row.location,
                    row.category,
                    &row.row_ref.sheet_key,
                    row.row_ref.row_index,
                    row.raw,
                    today,
                )
            })
            .collect();

        ProfileSet {
            profiles,
            warnings: self.warnings,
        }
    }
}

/// Body of the update POST
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest<'a> {
    pub action: &'static str,
    pub row_ref: &'a RowRef,
    pub updates: &'a ColumnUpdates,
    pub admin_secret: &'a str,
}

impl<'a> UpdateRequest<'a> {
    pub fn new(row_ref: &'a RowRef, updates: &'a ColumnUpdates, admin_secret: &'a str) -> Self {
        Self {
            action: "update",
            row_ref,
            updates,
            admin_secret,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProfileEntry {
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default, rename = "rowRef")]
    row_ref: Option<EntryRowRef>,
    #[serde(default)]
    raw: Option<serde_json::Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct EntryRowRef {
    #[serde(default, rename = "sheetKey")]
    sheet_key: Value,
    #[serde(default, rename = "rowIndex")]
    row_index: Value,
}

/// Render a JSON cell as text
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn row_index(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        _ => true,
    }
}

fn text_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(cell_text)
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

/// Interpret the GET response body
///
/// An `error` field fails the whole fetch; `warnings` are carried along;
/// `debug` lines are only logged.
pub fn parse_fetch_response(body: &Value) -> Result<FetchedRows> {
    let Some(envelope) = body.as_object() else {
        return Err(Error::Parse("response is not a JSON object".to_string()));
    };

    if let Some(error) = envelope.get("error").filter(|e| is_truthy(e)) {
        return Err(Error::Remote(cell_text(error)));
    }

    let mut warnings = text_list(envelope.get("warnings"));
    if !warnings.is_empty() {
        warn!("Sheets endpoint warnings: {}", warnings.join("; "));
    }
    for line in text_list(envelope.get("debug")) {
        debug!("Sheets endpoint debug: {}", line);
    }

    let entries: &[Value] = match envelope.get("profiles") {
        Some(Value::Array(entries)) => entries.as_slice(),
        _ => {
            warn!("Sheets response has no profiles array");
            &[]
        }
    };

    let mut rows = Vec::with_capacity(entries.len());
    for (position, entry) in entries.iter().enumerate() {
        match parse_entry(entry) {
            Ok(row) => rows.push(row),
            Err(reason) => {
                warn!("Skipping profile entry {}: {}", position, reason);
                warnings.push(format!("Entry {} skipped: {}", position, reason));
            }
        }
    }

    Ok(FetchedRows { rows, warnings })
}

fn parse_entry(entry: &Value) -> std::result::Result<SheetRow, String> {
    let entry: ProfileEntry =
        serde_json::from_value(entry.clone()).map_err(|e| format!("malformed entry ({})", e))?;

    let location = entry
        .location
        .as_deref()
        .unwrap_or_default()
        .parse::<Location>()
        .map_err(|e| e.to_string())?;
    let category = entry
        .category
        .as_deref()
        .unwrap_or_default()
        .parse::<Category>()
        .map_err(|e| e.to_string())?;

    let row_ref = entry
        .row_ref
        .map(|r| RowRef {
            sheet_key: cell_text(&r.sheet_key),
            row_index: row_index(&r.row_index),
        })
        .unwrap_or_default();

    let raw = entry
        .raw
        .unwrap_or_default()
        .iter()
        .map(|(column, value)| (column.clone(), cell_text(value)))
        .collect();

    Ok(SheetRow {
        location,
        category,
        row_ref,
        raw,
    })
}
