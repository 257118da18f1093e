//! Sheet row → [`NormalizedProfile`]
//!
//! Total over all inputs: a row with no recognizable cells still yields a
//! profile, just with every optional field absent.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::aliases::{is_known_column, Field};
use super::drive::{split_image_urls, to_image_url};
use super::{Category, Location, NormalizedProfile, RawRow, RowRef};
use crate::time::{age_from_birth_date, today, MAX_AGE_YEARS};

/// Display name used when a row has neither first nor last name
pub const NO_NAME: &str = "Sin nombre";

/// Cell values read as "yes" (compared lowercased and trimmed)
const YES_VALUES: [&str; 4] = ["si", "sí", "true", "x"];

/// Cell values read as "no"
const NO_VALUES: [&str; 2] = ["no", "false"];

/// Stable list key for a row within one fetch
pub fn build_id(location: Location, category: Category, row_ref: &RowRef) -> String {
    format!(
        "{}-{}-{}-{}",
        location, category, row_ref.sheet_key, row_ref.row_index
    )
}

/// Read a number out of free text such as `"1,75 m"` or `"70kg"`
///
/// The first comma is taken as the decimal separator, everything other
/// than digits and dots is dropped, and the longest numeric prefix is
/// read. No digits means no number.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.replacen(',', ".", 1);
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut seen_dot = false;
    let prefix_len = cleaned
        .char_indices()
        .find(|&(_, c)| {
            if c == '.' {
                if seen_dot {
                    return true;
                }
                seen_dot = true;
            }
            false
        })
        .map(|(i, _)| i)
        .unwrap_or(cleaned.len());
    let prefix = &cleaned[..prefix_len];

    if !prefix.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    prefix
        .trim_end_matches('.')
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Three-valued reading of yes/no cells; unrecognized text is `None`
pub fn parse_bool(text: &str) -> Option<bool> {
    let norm = text.trim().to_lowercase();
    if YES_VALUES.contains(&norm.as_str()) {
        Some(true)
    } else if NO_VALUES.contains(&norm.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Normalize a row, computing ages against today's local date
pub fn normalize_profile(
    location: Location,
    category: Category,
    sheet_key: &str,
    row_index: i64,
    row: RawRow,
) -> NormalizedProfile {
    normalize_profile_at(location, category, sheet_key, row_index, row, today())
}

/// Normalize a row, computing ages as of `today`
pub fn normalize_profile_at(
    location: Location,
    category: Category,
    sheet_key: &str,
    row_index: i64,
    row: RawRow,
    today: NaiveDate,
) -> NormalizedProfile {
    let text = |field: Field| field.resolve(&row).map(str::to_string);

    let full_name = [Field::FirstName, Field::LastName]
        .into_iter()
        .filter_map(|field| field.resolve(&row))
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();
    let full_name = if full_name.is_empty() {
        NO_NAME.to_string()
    } else {
        full_name
    };

    // An explicit age column beats a birth date; either alias of the
    // birth date may carry it. Both must land in [0, MAX_AGE_YEARS).
    let age = Field::Age
        .resolve(&row)
        .and_then(parse_number)
        .map(f64::trunc)
        .filter(|n| (0.0..f64::from(MAX_AGE_YEARS)).contains(n))
        .map(|n| n as u32)
        .or_else(|| {
            Field::BirthDate
                .aliases()
                .iter()
                .filter_map(|column| row.get(*column))
                .find_map(|cell| age_from_birth_date(cell, today))
        });

    let phones = [Field::Phone, Field::OtherPhone]
        .into_iter()
        .filter_map(|field| field.resolve(&row))
        .collect::<Vec<_>>()
        .join(" / ");

    let extra_fields: BTreeMap<String, String> = row
        .iter()
        .filter(|(column, value)| !value.is_empty() && !is_known_column(column))
        .map(|(column, value)| (column.clone(), value.clone()))
        .collect();

    let row_ref = RowRef {
        sheet_key: sheet_key.to_string(),
        row_index,
    };

    NormalizedProfile {
        id: build_id(location, category, &row_ref),
        location,
        category,
        row_ref,
        full_name,
        age,
        gender: text(Field::Gender),
        nationality: text(Field::Nationality),
        city_country: text(Field::CityCountry),
        height_meters: Field::Height.resolve(&row).and_then(parse_number),
        weight_kg: Field::Weight.resolve(&row).and_then(parse_number),
        shirt_size: text(Field::ShirtSize),
        pants_size: text(Field::PantsSize),
        shoe_size: text(Field::ShoeSize),
        ethnicity: text(Field::Ethnicity),
        eye_color: text(Field::EyeColor),
        hair_color: text(Field::HairColor),
        skin_color: text(Field::SkinColor),
        tattoos: Field::Tattoos.resolve(&row).and_then(parse_bool),
        tattoos_where: text(Field::TattoosWhere),
        skills: text(Field::Skills),
        languages: text(Field::Languages),
        acting_experience: text(Field::ActingExperience),
        is_professional_actor: text(Field::IsProfessionalActor),
        knows_acting: text(Field::KnowsActing),
        wants_extras: text(Field::WantsExtras),
        profession: text(Field::Profession),
        driver_license: text(Field::DriverLicense),
        availability: text(Field::Availability),
        health_restrictions: text(Field::HealthRestrictions),
        health_issues: text(Field::HealthIssues),
        disability: text(Field::Disability),
        main_photo: Field::MainPhoto.resolve(&row).and_then(to_image_url),
        headshot_photo: Field::HeadshotPhoto.resolve(&row).and_then(to_image_url),
        medium_photo: Field::MediumPhoto.resolve(&row).and_then(to_image_url),
        extra_photos: Field::ExtraPhotos
            .resolve(&row)
            .map(split_image_urls)
            .unwrap_or_default(),
        reel_link: text(Field::ReelLink),
        social_links: text(Field::SocialLinks),
        phones: Some(phones).filter(|p| !p.is_empty()),
        email: text(Field::Email),
        notes: text(Field::ContactNotes),
        extra_fields,
        raw: row,
    }
}
