//! Regional address abbreviations (Ecuadorian Spanish)
//!
//! Keys are lower-case tokens as users type them, with and without the
//! trailing period.

pub const ABBREVIATIONS: &[(&str, &str)] = &[
    ("av", "avenida"),
    ("av.", "avenida"),
    ("cll", "calle"),
    ("cll.", "calle"),
    ("cl", "calle"),
    ("cl.", "calle"),
    ("cra", "carrera"),
    ("cra.", "carrera"),
    ("cr", "carrera"),
    ("cr.", "carrera"),
    ("diag", "diagonal"),
    ("diag.", "diagonal"),
    ("trans", "transversal"),
    ("trans.", "transversal"),
    ("urb", "urbanización"),
    ("urb.", "urbanización"),
    ("cdla", "ciudadela"),
    ("cdla.", "ciudadela"),
    ("conj", "conjunto"),
    ("conj.", "conjunto"),
    ("edif", "edificio"),
    ("edif.", "edificio"),
    ("pje", "pasaje"),
    ("pje.", "pasaje"),
    ("mz", "manzana"),
    ("mz.", "manzana"),
    ("sl", "solar"),
    ("sl.", "solar"),
];

/// Expanded form of a whole token, if it is a known abbreviation
pub fn expand(token: &str) -> Option<&'static str> {
    ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| *abbr == token)
        .map(|(_, full)| *full)
}
