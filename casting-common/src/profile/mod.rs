//! Talent profile model and the spreadsheet row mapping
//!
//! A sheet row arrives as loosely named text cells ([`RawRow`]). The
//! submodules turn it into a typed [`NormalizedProfile`] and map admin
//! edits back onto the row's own column names.

pub mod aliases;
pub mod drive;
pub mod normalize;
pub mod reverse;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::Error;

pub use aliases::Field;
pub use normalize::{normalize_profile, normalize_profile_at};
pub use reverse::{build_updates, ColumnUpdates, EditableField, ProfileEdits};

/// Spreadsheet row: exact header text → cell text
pub type RawRow = BTreeMap<String, String>;

/// Location of a row in the external spreadsheet
///
/// Opaque here; only echoed back to the endpoint when saving.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowRef {
    pub sheet_key: String,
    pub row_index: i64,
}

/// Site the talent signed up for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    #[serde(rename = "Montevideo")]
    Montevideo,
    #[serde(rename = "Punta del Este")]
    PuntaDelEste,
}

impl Location {
    pub const ALL: [Location; 2] = [Location::Montevideo, Location::PuntaDelEste];

    pub fn as_str(self) -> &'static str {
        match self {
            Location::Montevideo => "Montevideo",
            Location::PuntaDelEste => "Punta del Este",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::ALL
            .into_iter()
            .find(|loc| loc.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidInput(format!("unknown location: {}", s)))
    }
}

/// Talent roster a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Actores,
    Casting,
    Extras,
    Menores,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Actores,
        Category::Casting,
        Category::Extras,
        Category::Menores,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Actores => "ACTORES",
            Category::Casting => "CASTING",
            Category::Extras => "EXTRAS",
            Category::Menores => "MENORES",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|cat| cat.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidInput(format!("unknown category: {}", s)))
    }
}

/// Typed talent profile derived from one sheet row
///
/// Absent cells stay `None`; nothing is defaulted. `raw` keeps the source
/// row for the save path and is never sent to the browser.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedProfile {
    pub id: String,
    pub location: Location,
    pub category: Category,
    pub row_ref: RowRef,

    // Identity and demographics
    pub full_name: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub city_country: Option<String>,

    // Measurements and appearance
    pub height_meters: Option<f64>,
    pub weight_kg: Option<f64>,
    pub shirt_size: Option<String>,
    pub pants_size: Option<String>,
    pub shoe_size: Option<String>,
    pub ethnicity: Option<String>,
    pub eye_color: Option<String>,
    pub hair_color: Option<String>,
    pub skin_color: Option<String>,
    pub tattoos: Option<bool>,
    pub tattoos_where: Option<String>,

    // Skills and experience
    pub skills: Option<String>,
    pub languages: Option<String>,
    pub acting_experience: Option<String>,
    pub is_professional_actor: Option<String>,
    pub knows_acting: Option<String>,
    pub wants_extras: Option<String>,
    pub profession: Option<String>,

    // Logistics and health
    pub driver_license: Option<String>,
    pub availability: Option<String>,
    pub health_restrictions: Option<String>,
    pub health_issues: Option<String>,
    pub disability: Option<String>,

    // Photos
    pub main_photo: Option<String>,
    pub headshot_photo: Option<String>,
    pub medium_photo: Option<String>,
    pub extra_photos: Vec<String>,

    // Links and contact
    pub reel_link: Option<String>,
    pub social_links: Option<String>,
    pub phones: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,

    /// Non-empty cells under headers the alias tables do not know
    pub extra_fields: BTreeMap<String, String>,

    #[serde(skip)]
    pub raw: RawRow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_round_trip_names() {
        assert_eq!("Punta del Este".parse::<Location>().unwrap(), Location::PuntaDelEste);
        assert_eq!(" montevideo ".parse::<Location>().unwrap(), Location::Montevideo);
        assert!("Salto".parse::<Location>().is_err());
        assert_eq!(
            serde_json::to_value(Location::PuntaDelEste).unwrap(),
            serde_json::json!("Punta del Este")
        );
    }

    #[test]
    fn test_category_names() {
        assert_eq!("extras".parse::<Category>().unwrap(), Category::Extras);
        assert!("MODELOS".parse::<Category>().is_err());
        assert_eq!(
            serde_json::to_value(Category::Menores).unwrap(),
            serde_json::json!("MENORES")
        );
    }

    #[test]
    fn test_row_ref_wire_format() {
        let r = RowRef {
            sheet_key: "mvd_actores".to_string(),
            row_index: 7,
        };
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            serde_json::json!({"sheetKey": "mvd_actores", "rowIndex": 7})
        );
    }
}
