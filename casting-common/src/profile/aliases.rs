//! Column alias resolution
//!
//! Spreadsheet headers changed across sign-up form revisions and some
//! carry typos (`IDOMAS`, `TUTUAJES`, `TTALLE DE CAMISA`). Each logical
//! field declares the header spellings it accepts, in priority order.
//! The first alias with a non-empty cell wins; the rest are ignored.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use super::RawRow;

/// Logical profile fields read from a sheet row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Age,
    BirthDate,
    Gender,
    Nationality,
    CityCountry,
    Height,
    Weight,
    ShirtSize,
    PantsSize,
    ShoeSize,
    Ethnicity,
    EyeColor,
    HairColor,
    SkinColor,
    Tattoos,
    TattoosWhere,
    Skills,
    Languages,
    ActingExperience,
    IsProfessionalActor,
    KnowsActing,
    WantsExtras,
    Profession,
    DriverLicense,
    Availability,
    HealthRestrictions,
    HealthIssues,
    Disability,
    MainPhoto,
    HeadshotPhoto,
    MediumPhoto,
    ExtraPhotos,
    ReelLink,
    SocialLinks,
    Phone,
    OtherPhone,
    Email,
    ContactNotes,
}

impl Field {
    pub const ALL: [Field; 40] = [
        Field::FirstName,
        Field::LastName,
        Field::Age,
        Field::BirthDate,
        Field::Gender,
        Field::Nationality,
        Field::CityCountry,
        Field::Height,
        Field::Weight,
        Field::ShirtSize,
        Field::PantsSize,
        Field::ShoeSize,
        Field::Ethnicity,
        Field::EyeColor,
        Field::HairColor,
        Field::SkinColor,
        Field::Tattoos,
        Field::TattoosWhere,
        Field::Skills,
        Field::Languages,
        Field::ActingExperience,
        Field::IsProfessionalActor,
        Field::KnowsActing,
        Field::WantsExtras,
        Field::Profession,
        Field::DriverLicense,
        Field::Availability,
        Field::HealthRestrictions,
        Field::HealthIssues,
        Field::Disability,
        Field::MainPhoto,
        Field::HeadshotPhoto,
        Field::MediumPhoto,
        Field::ExtraPhotos,
        Field::ReelLink,
        Field::SocialLinks,
        Field::Phone,
        Field::OtherPhone,
        Field::Email,
        Field::ContactNotes,
    ];

    /// Header spellings for this field, highest priority first
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::FirstName => &["NOMBRES", "NOMBRE", "NOMBRES DEL MENOR"],
            Field::LastName => &["APELLIDOS", "APELLIDOS DEL MENOR"],
            Field::Age => &["EDAD"],
            Field::BirthDate => &["FECHA DE NACIMIENTO", "FECHA DE NACIMIENTO DEL MENOR"],
            Field::Gender => &["GÉNERO"],
            Field::Nationality => &["NACIONALIDAD"],
            Field::CityCountry => &["CIUDAD Y PAÍS DE RESIDENCIA"],
            Field::Height => &["ALTURA EN METROS"],
            Field::Weight => &["PESO EN KG"],
            Field::ShirtSize => &["TALLE DE CAMISA", "TTALLE DE CAMISA"],
            Field::PantsSize => &["TALLE DE PANTALÓN"],
            Field::ShoeSize => &["TALLE DE CALZADO"],
            Field::Ethnicity => &["ETNIA"],
            Field::EyeColor => &["COLOR DE OJOS"],
            Field::HairColor => &["COLOR DE PELO", "COLOR DE CABELLO"],
            Field::SkinColor => &["COLOR DE PIEL"],
            Field::Tattoos => &["TATUAJES", "TUTUAJES"],
            Field::TattoosWhere => &["SI TU RESPUESTA ANTERIOR FUE SI, DÓNDE TENÉS"],
            Field::Skills => &["HABILIDADES"],
            Field::Languages => &["IDIOMAS", "IDOMAS"],
            Field::ActingExperience => &["EXPERIENCIA ACTORAL", "EXPERIENCIA EN ACTUACIÓN"],
            Field::IsProfessionalActor => &["SOS ACTOR PROFESIONAL"],
            Field::KnowsActing => &["SABES ACTUAR"],
            Field::WantsExtras => &["TE INTERESA SER EXTRA", "INTERES EN SER EXTRA"],
            Field::Profession => &["PROFESIÓN U OCUPACIÓN"],
            Field::DriverLicense => &["LIBRETA DE CONDUCIR"],
            Field::Availability => &[
                "DISPONIBILIDAD HORARIA",
                "QUE DISPONIBILIDAD HORARIA TENES",
            ],
            Field::HealthRestrictions => &["RESTRICCIONES ALIMENTICIAS"],
            Field::HealthIssues => &["PROBLEMA DE SALUD A SABER"],
            Field::Disability => &["DISCAPACIDAD A SABER"],
            // Full-body shot, falling back to the close-up
            Field::MainPhoto => &[
                "FOTO INDIVIDUAL PLANO ENTERO FONDO LISO",
                "FOTO INDIVIDUAL PRIMER PLANO FONDO LISO",
            ],
            Field::HeadshotPhoto => &["FOTO INDIVIDUAL PRIMER PLANO FONDO LISO"],
            Field::MediumPhoto => &["FOTO INDIVIDUAL PLANO MEDIO FONDO LISO"],
            Field::ExtraPhotos => &["FOTOS ADICIONALES"],
            Field::ReelLink => &["LINK A REEL"],
            Field::SocialLinks => &["LINK A TU REDES"],
            Field::Phone => &["NÚMERO DE CONTACTO"],
            Field::OtherPhone => &["OTRO NÚMERO DE CONTACTO"],
            Field::Email => &["MAIL", "Dirección de correo electrónico"],
            Field::ContactNotes => &[
                "OBSERVACION DE CONTACTO",
                "OBSERVACIÓN DE CONTACTO",
                "Observaciones",
            ],
        }
    }

    /// Value of the first alias with a non-empty cell in `row`
    pub fn resolve(self, row: &RawRow) -> Option<&str> {
        resolve(row, self.aliases())
    }
}

/// Columns the forms collect that the catalog deliberately does not show
///
/// They count as known so that identity documents, home addresses and
/// similar never leak into `extra_fields`.
pub const UNMAPPED_COLUMNS: &[&str] = &[
    "Marca temporal",
    "DÓNDE ESTUDIASTE ACTUACIÓN",
    "CEDULA DE IDENTIDAD (SIN PUNTOS NI GUIONES)",
    "CÉDULA DE IDENTIDAD (SIN PUNTOS NI GUIONES)",
    "DOCUMENTO DE IDENTIDAD (SIN PUNTOS NI GUIONES)",
    "OTRO DOCUMENTO DE IDENTIDAD",
    "DOMICILIO",
    "DOMICILIO DEL MENOR",
    "BARRIO",
    "NOMBRE Y APELLIDO DE AMBOS PADRES O MADRES",
    "FOTO DE LA CEDULA DEL PADRE/MADRE/TUTOR A CARGO",
];

/// Every alias of every field plus [`UNMAPPED_COLUMNS`]
static KNOWN_COLUMNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    Field::ALL
        .iter()
        .flat_map(|field| field.aliases().iter().copied())
        .chain(UNMAPPED_COLUMNS.iter().copied())
        .collect()
});

/// Whether `column` is a header the alias tables account for
pub fn is_known_column(column: &str) -> bool {
    KNOWN_COLUMNS.contains(column)
}

/// Value of the first candidate column present in `row` with a non-empty cell
pub fn resolve<'a>(row: &'a RawRow, candidates: &[&str]) -> Option<&'a str> {
    resolve_with_key(row, candidates).map(|(_, value)| value)
}

/// Like [`resolve`], also reporting which candidate supplied the value
pub fn resolve_with_key<'a, 'c>(
    row: &'a RawRow,
    candidates: &[&'c str],
) -> Option<(&'c str, &'a str)> {
    candidates.iter().find_map(|&column| {
        row.get(column)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
            .map(|value| (column, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_declared_alias_wins() {
        let r = row(&[("IDIOMAS", "English"), ("IDOMAS", "French")]);
        assert_eq!(Field::Languages.resolve(&r), Some("English"));
    }

    #[test]
    fn test_falls_through_to_misspelled_alias() {
        let r = row(&[("IDOMAS", "French")]);
        assert_eq!(Field::Languages.resolve(&r), Some("French"));
    }

    #[test]
    fn test_empty_cell_does_not_shadow_later_alias() {
        let r = row(&[("IDIOMAS", ""), ("IDOMAS", "French")]);
        assert_eq!(Field::Languages.resolve(&r), Some("French"));
    }

    #[test]
    fn test_absent_when_no_alias_matches() {
        let r = row(&[("Something else", "x")]);
        assert_eq!(Field::Languages.resolve(&r), None);
        assert_eq!(Field::Languages.resolve(&RawRow::new()), None);
    }

    #[test]
    fn test_resolve_with_key_reports_source_column() {
        let r = row(&[("TUTUAJES", "si")]);
        assert_eq!(
            resolve_with_key(&r, Field::Tattoos.aliases()),
            Some(("TUTUAJES", "si"))
        );
    }

    #[test]
    fn test_alias_table_priorities() {
        let cases: &[(Field, &[(&str, &str)], Option<&str>)] = &[
            (Field::FirstName, &[("NOMBRE", "Ana"), ("NOMBRES DEL MENOR", "Leo")], Some("Ana")),
            (Field::ShirtSize, &[("TTALLE DE CAMISA", "M")], Some("M")),
            (Field::HairColor, &[("COLOR DE CABELLO", "Castaño")], Some("Castaño")),
            (
                Field::Availability,
                &[("QUE DISPONIBILIDAD HORARIA TENES", "Tardes")],
                Some("Tardes"),
            ),
            (
                Field::Email,
                &[("Dirección de correo electrónico", "a@b.uy"), ("MAIL", "c@d.uy")],
                Some("c@d.uy"),
            ),
            (
                Field::ContactNotes,
                &[("Observaciones", "general"), ("OBSERVACION DE CONTACTO", "llamar")],
                Some("llamar"),
            ),
            (
                Field::ContactNotes,
                &[
                    ("OBSERVACIÓN DE CONTACTO", "con tilde"),
                    ("OBSERVACION DE CONTACTO", "sin tilde"),
                ],
                Some("sin tilde"),
            ),
            (
                Field::MainPhoto,
                &[("FOTO INDIVIDUAL PRIMER PLANO FONDO LISO", "id")],
                Some("id"),
            ),
        ];

        for (field, pairs, expected) in cases {
            assert_eq!(field.resolve(&row(pairs)), *expected, "{:?}", field);
        }
    }

    #[test]
    fn test_every_alias_is_known() {
        for field in Field::ALL {
            for alias in field.aliases() {
                assert!(is_known_column(alias), "{} should be known", alias);
            }
        }
        for column in UNMAPPED_COLUMNS {
            assert!(is_known_column(column));
        }
        assert!(!is_known_column("TIENE PASAPORTE"));
    }

    #[test]
    fn test_renamed_acting_column_is_known() {
        assert!(is_known_column("EXPERIENCIA EN ACTUACIÓN"));
        assert!(is_known_column("NOMBRE"));
    }
}
