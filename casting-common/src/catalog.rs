//! Catalog filtering over an in-memory profile list
//!
//! All operations keep the input order, so clearing every filter gives
//! back the list exactly as it was fetched (or shuffled).

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeSet;

use crate::profile::{Category, Location, NormalizedProfile};

/// Public catalog filters; empty lists do not restrict
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub search: String,
    pub locations: Vec<Location>,
    pub categories: Vec<Category>,
    pub genders: Vec<String>,
}

impl CatalogFilter {
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.locations.is_empty()
            && self.categories.is_empty()
            && self.genders.is_empty()
    }

    pub fn matches(&self, profile: &NormalizedProfile) -> bool {
        if !self.locations.is_empty() && !self.locations.contains(&profile.location) {
            return false;
        }
        if !self.categories.is_empty() && !self.categories.contains(&profile.category) {
            return false;
        }
        // Profiles that never stated a gender stay visible
        if let Some(gender) = &profile.gender {
            let gender = gender.trim();
            if !self.genders.is_empty() && !self.genders.iter().any(|g| g.trim() == gender) {
                return false;
            }
        }
        if !self.search.trim().is_empty() {
            let haystack = haystack(&[
                Some(profile.full_name.as_str()),
                profile.city_country.as_deref(),
                profile.nationality.as_deref(),
                profile.skills.as_deref(),
                profile.languages.as_deref(),
            ]);
            if !haystack.contains(&self.search.to_lowercase()) {
                return false;
            }
        }
        true
    }

    /// Profiles passing every filter, in input order
    pub fn apply<'a>(&self, profiles: &'a [NormalizedProfile]) -> Vec<&'a NormalizedProfile> {
        profiles.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Admin list search over name, city, email and phones
pub fn admin_search<'a>(
    profiles: &'a [NormalizedProfile],
    query: &str,
) -> Vec<&'a NormalizedProfile> {
    if query.trim().is_empty() {
        return profiles.iter().collect();
    }
    let needle = query.to_lowercase();
    profiles
        .iter()
        .filter(|p| {
            haystack(&[
                Some(p.full_name.as_str()),
                p.city_country.as_deref(),
                p.email.as_deref(),
                p.phones.as_deref(),
            ])
            .contains(&needle)
        })
        .collect()
}

/// Distinct stated genders, trimmed and sorted, for the filter facet
pub fn distinct_genders(profiles: &[NormalizedProfile]) -> Vec<String> {
    profiles
        .iter()
        .filter_map(|p| p.gender.as_deref())
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Shuffle deterministically for `seed`
///
/// The catalog page picks one seed per visit so that successive "load
/// more" requests see the same order.
pub fn shuffle_seeded<T>(items: &mut [T], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    items.shuffle(&mut rng);
}

fn haystack(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{normalize_profile_at, RawRow};
    use chrono::NaiveDate;

    fn profile(
        location: Location,
        category: Category,
        index: i64,
        pairs: &[(&str, &str)],
    ) -> NormalizedProfile {
        let row: RawRow = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        normalize_profile_at(
            location,
            category,
            "sheet",
            index,
            row,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        )
    }

    fn sample() -> Vec<NormalizedProfile> {
        vec![
            profile(
                Location::Montevideo,
                Category::Actores,
                1,
                &[("NOMBRES", "Ana"), ("GÉNERO", "Femenino"), ("HABILIDADES", "Canto, baile")],
            ),
            profile(
                Location::PuntaDelEste,
                Category::Extras,
                2,
                &[("NOMBRES", "Bruno"), ("GÉNERO", "Masculino"), ("IDIOMAS", "Inglés")],
            ),
            profile(
                Location::Montevideo,
                Category::Menores,
                3,
                &[
                    ("NOMBRES DEL MENOR", "Carla"),
                    ("CIUDAD Y PAÍS DE RESIDENCIA", "Salto, Uruguay"),
                ],
            ),
            profile(
                Location::Montevideo,
                Category::Casting,
                4,
                &[("NOMBRES", "Diego"), ("GÉNERO", " Masculino "), ("MAIL", "diego@x.uy")],
            ),
        ]
    }

    fn ids(list: &[&NormalizedProfile]) -> Vec<i64> {
        list.iter().map(|p| p.row_ref.row_index).collect()
    }

    #[test]
    fn test_empty_filter_returns_all_in_order() {
        let profiles = sample();
        let filter = CatalogFilter::default();
        assert!(filter.is_empty());
        assert_eq!(ids(&filter.apply(&profiles)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_location_filter() {
        let profiles = sample();
        let filter = CatalogFilter {
            locations: vec![Location::PuntaDelEste],
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&profiles)), vec![2]);
    }

    #[test]
    fn test_location_absent_from_all_profiles_yields_nothing() {
        let profiles: Vec<_> = sample()
            .into_iter()
            .filter(|p| p.location == Location::Montevideo)
            .collect();
        let filter = CatalogFilter {
            locations: vec![Location::PuntaDelEste],
            ..Default::default()
        };
        assert!(filter.apply(&profiles).is_empty());
    }

    #[test]
    fn test_category_filter_multiple_values() {
        let profiles = sample();
        let filter = CatalogFilter {
            categories: vec![Category::Menores, Category::Actores],
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&profiles)), vec![1, 3]);
    }

    #[test]
    fn test_gender_filter_keeps_profiles_without_gender() {
        let profiles = sample();
        let filter = CatalogFilter {
            genders: vec!["Femenino".to_string()],
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&profiles)), vec![1, 3]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let profiles = sample();
        let filter = CatalogFilter {
            search: "CANTO".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&profiles)), vec![1]);

        let filter = CatalogFilter {
            search: "salto".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&profiles)), vec![3]);
    }

    #[test]
    fn test_search_does_not_look_at_email() {
        let profiles = sample();
        let filter = CatalogFilter {
            search: "diego@".to_string(),
            ..Default::default()
        };
        assert!(filter.apply(&profiles).is_empty());
    }

    #[test]
    fn test_whitespace_search_ignored() {
        let profiles = sample();
        let filter = CatalogFilter {
            search: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(filter.apply(&profiles).len(), 4);
    }

    #[test]
    fn test_combined_filters() {
        let profiles = sample();
        let filter = CatalogFilter {
            search: "o".to_string(),
            locations: vec![Location::Montevideo],
            genders: vec!["Masculino".to_string()],
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&profiles)), vec![3, 4]);
    }

    #[test]
    fn test_gender_chip_matches_padded_values() {
        let profiles = sample();
        let chips = distinct_genders(&profiles);
        let filter = CatalogFilter {
            genders: vec![chips[1].clone()],
            ..Default::default()
        };
        assert_eq!(chips[1], "Masculino");
        assert_eq!(ids(&filter.apply(&profiles)), vec![2, 3, 4]);
    }

    #[test]
    fn test_distinct_genders_sorted_trimmed() {
        assert_eq!(
            distinct_genders(&sample()),
            vec!["Femenino".to_string(), "Masculino".to_string()]
        );
    }

    #[test]
    fn test_admin_search_fields() {
        let profiles = sample();
        assert_eq!(ids(&admin_search(&profiles, "DIEGO@X")), vec![4]);
        assert_eq!(ids(&admin_search(&profiles, "")), vec![1, 2, 3, 4]);
        assert!(admin_search(&profiles, "canto").is_empty());
    }

    #[test]
    fn test_shuffle_is_deterministic_per_seed() {
        let mut a: Vec<u32> = (0..50).collect();
        let mut b = a.clone();
        shuffle_seeded(&mut a, 42);
        shuffle_seeded(&mut b, 42);
        assert_eq!(a, b);

        let mut sorted = a.clone();
        sorted.sort();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }
}
