//! Admin edits → column updates
//!
//! Edits name logical fields; the sheet needs exact header text. Rows
//! from different form revisions spell some headers differently, so each
//! edit is written under whichever spelling the row already uses. Only
//! rows with no spelling at all get the canonical one, which keeps the
//! sheet from growing duplicate columns.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::aliases::{resolve_with_key, Field};
use super::{NormalizedProfile, RawRow};

/// Exact header text → new cell text
pub type ColumnUpdates = BTreeMap<String, String>;

/// Separator the catalog uses between the two phone columns
pub const PHONE_SEPARATOR: &str = " / ";

/// Logical fields the admin editor can change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditableField {
    Phones,
    Email,
    Notes,
    Skills,
    Languages,
    ActingExperience,
    ReelLink,
    SocialLinks,
    Availability,
    WantsExtras,
    DriverLicense,
}

impl EditableField {
    pub const ALL: [EditableField; 11] = [
        EditableField::Phones,
        EditableField::Email,
        EditableField::Notes,
        EditableField::Skills,
        EditableField::Languages,
        EditableField::ActingExperience,
        EditableField::ReelLink,
        EditableField::SocialLinks,
        EditableField::Availability,
        EditableField::WantsExtras,
        EditableField::DriverLicense,
    ];

    /// Headers this field may be written to; the first is the canonical one
    ///
    /// Narrower than the read aliases where a read alias is really a
    /// different column: the form's collected address for email, and the
    /// general `Observaciones` column for contact notes.
    pub fn write_aliases(self) -> &'static [&'static str] {
        match self {
            EditableField::Phones => Field::Phone.aliases(),
            EditableField::Email => &["MAIL"],
            EditableField::Notes => &["OBSERVACION DE CONTACTO", "OBSERVACIÓN DE CONTACTO"],
            EditableField::Skills => Field::Skills.aliases(),
            EditableField::Languages => Field::Languages.aliases(),
            EditableField::ActingExperience => Field::ActingExperience.aliases(),
            EditableField::ReelLink => Field::ReelLink.aliases(),
            EditableField::SocialLinks => Field::SocialLinks.aliases(),
            EditableField::Availability => Field::Availability.aliases(),
            EditableField::WantsExtras => Field::WantsExtras.aliases(),
            EditableField::DriverLicense => Field::DriverLicense.aliases(),
        }
    }
}

/// Edited values for one profile; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEdits {
    pub phones: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub skills: Option<String>,
    pub languages: Option<String>,
    pub acting_experience: Option<String>,
    pub reel_link: Option<String>,
    pub social_links: Option<String>,
    pub availability: Option<String>,
    pub wants_extras: Option<String>,
    pub driver_license: Option<String>,
}

impl ProfileEdits {
    /// Editable copy of a profile's current values (absent → empty text)
    pub fn from_profile(profile: &NormalizedProfile) -> Self {
        let current = |value: &Option<String>| Some(value.clone().unwrap_or_default());
        Self {
            phones: current(&profile.phones),
            email: current(&profile.email),
            notes: current(&profile.notes),
            skills: current(&profile.skills),
            languages: current(&profile.languages),
            acting_experience: current(&profile.acting_experience),
            reel_link: current(&profile.reel_link),
            social_links: current(&profile.social_links),
            availability: current(&profile.availability),
            wants_extras: current(&profile.wants_extras),
            driver_license: current(&profile.driver_license),
        }
    }

    pub fn get(&self, field: EditableField) -> Option<&str> {
        match field {
            EditableField::Phones => self.phones.as_deref(),
            EditableField::Email => self.email.as_deref(),
            EditableField::Notes => self.notes.as_deref(),
            EditableField::Skills => self.skills.as_deref(),
            EditableField::Languages => self.languages.as_deref(),
            EditableField::ActingExperience => self.acting_experience.as_deref(),
            EditableField::ReelLink => self.reel_link.as_deref(),
            EditableField::SocialLinks => self.social_links.as_deref(),
            EditableField::Availability => self.availability.as_deref(),
            EditableField::WantsExtras => self.wants_extras.as_deref(),
            EditableField::DriverLicense => self.driver_license.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        EditableField::ALL.iter().all(|field| self.get(*field).is_none())
    }
}

/// Header to write `aliases` back to for this row
///
/// The alias currently holding a value, else the first alias the row has
/// as a key at all, else the canonical (first) alias.
pub fn target_column(original: &RawRow, aliases: &[&'static str]) -> &'static str {
    if let Some((column, _)) = resolve_with_key(original, aliases) {
        return column;
    }
    aliases
        .iter()
        .copied()
        .find(|column| original.contains_key(*column))
        .or_else(|| aliases.first().copied())
        .unwrap_or_default()
}

/// Build the update set for `edits` against the row they were made on
///
/// A non-empty edit lands in one column per [`target_column`]. An empty
/// edit also blanks every other populated write alias, otherwise the next
/// read would fall through to a shadowed spelling and show its old value.
pub fn build_updates(original: &RawRow, edits: &ProfileEdits) -> ColumnUpdates {
    let mut updates = ColumnUpdates::new();

    for field in EditableField::ALL {
        let Some(value) = edits.get(field) else {
            continue;
        };

        if field == EditableField::Phones {
            write_phones(original, value, &mut updates);
            continue;
        }

        let aliases = field.write_aliases();
        let column = target_column(original, aliases);
        updates.insert(column.to_string(), value.to_string());

        if value.is_empty() {
            for alias in aliases {
                if original.get(*alias).is_some_and(|cell| !cell.is_empty()) {
                    updates.insert(alias.to_string(), String::new());
                }
            }
        }
    }

    updates
}

/// Phones are shown as `main / other`; split them back into two columns
fn write_phones(original: &RawRow, value: &str, updates: &mut ColumnUpdates) {
    let main_column = target_column(original, Field::Phone.aliases());
    let other_column = target_column(original, Field::OtherPhone.aliases());

    match value.split_once(PHONE_SEPARATOR) {
        Some((main, other)) if !other.contains(PHONE_SEPARATOR) => {
            updates.insert(main_column.to_string(), main.trim().to_string());
            updates.insert(other_column.to_string(), other.trim().to_string());
        }
        _ => {
            updates.insert(main_column.to_string(), value.to_string());
            if original.contains_key(other_column) {
                updates.insert(other_column.to_string(), String::new());
            }
        }
    }
}
