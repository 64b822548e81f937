//! Query normalization
//!
//! Turns what a user types into what the geocoder should see:
//! - lower-cased and trimmed
//! - regional abbreviations expanded when they stand as whole tokens
//! - a default "<city>, <country>" scope appended when the query names no
//!   known locality
//!
//! Normalization is pure and deterministic for a given `Normalizer`.

pub mod dictionary;

use crate::config::RegionConfig;
use serde::{Deserialize, Serialize};

/// A query ready for the geocoder. Derived, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedQuery(String);

impl NormalizedQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NormalizedQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rewrites raw queries for a service area
#[derive(Debug, Clone)]
pub struct Normalizer {
    cities: Vec<String>,
    default_city: String,
    default_country: String,
}

impl Normalizer {
    /// Create a normalizer for an explicit service area
    pub fn new(
        cities: impl IntoIterator<Item = impl Into<String>>,
        default_city: impl Into<String>,
        default_country: impl Into<String>,
    ) -> Self {
        Self {
            cities: cities
                .into_iter()
                .map(|c| c.into().to_lowercase())
                .collect(),
            default_city: default_city.into(),
            default_country: default_country.into(),
        }
    }

    /// Create a normalizer from the `[region]` config section
    pub fn from_region(region: &RegionConfig) -> Self {
        Self::new(
            region.cities.iter().cloned(),
            region.default_city.clone(),
            region.default_country.clone(),
        )
    }

    /// Normalize a raw query
    pub fn normalize(&self, raw: &str) -> NormalizedQuery {
        let expanded = expand_abbreviations(raw.trim());
        NormalizedQuery(self.add_scope(expanded))
    }

    /// Whether the (lower-cased) query already names a city or the country
    pub fn has_locality(&self, query: &str) -> bool {
        let lower = query.to_lowercase();
        self.cities.iter().any(|city| lower.contains(city.as_str()))
            || lower.contains(&self.default_country.to_lowercase())
    }

    fn add_scope(&self, query: String) -> String {
        if self.has_locality(&query) {
            query
        } else {
            format!("{}, {}, {}", query, self.default_city, self.default_country)
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::from_region(&RegionConfig::default())
    }
}

/// Lower-case the input and expand abbreviations that form a whole
/// whitespace-delimited token. Whitespace is preserved as typed.
pub fn expand_abbreviations(query: &str) -> String {
    let lower = query.to_lowercase();
    let mut out = String::with_capacity(lower.len() + 16);
    let mut token_start: Option<usize> = None;

    for (i, c) in lower.char_indices() {
        if c.is_whitespace() {
            if let Some(start) = token_start.take() {
                push_token(&mut out, &lower[start..i]);
            }
            out.push(c);
        } else if token_start.is_none() {
            token_start = Some(i);
        }
    }
    if let Some(start) = token_start {
        push_token(&mut out, &lower[start..]);
    }

    out
}

fn push_token(out: &mut String, token: &str) {
    out.push_str(dictionary::expand(token).unwrap_or(token));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> Normalizer {
        Normalizer::default()
    }

    #[test]
    fn test_expands_leading_abbreviation_and_adds_scope() {
        assert_eq!(
            normalizer().normalize("av amazonas").as_str(),
            "avenida amazonas, Quito, Ecuador"
        );
    }

    #[test]
    fn test_city_present_leaves_suffix_alone() {
        assert_eq!(normalizer().normalize("calle 10 quito").as_str(), "calle 10 quito");
    }

    #[test]
    fn test_country_present_leaves_suffix_alone() {
        assert_eq!(
            normalizer().normalize("Av. 6 de Diciembre, Ecuador").as_str(),
            "avenida 6 de diciembre, ecuador"
        );
    }

    #[test]
    fn test_multi_word_city_detected() {
        assert_eq!(
            normalizer().normalize("cdla los rosales santo domingo").as_str(),
            "ciudadela los rosales santo domingo"
        );
    }

    #[test]
    fn test_dotted_and_mid_string_abbreviations() {
        assert_eq!(
            expand_abbreviations("Urb. La Armenia mz 4 sl. 12"),
            "urbanización la armenia manzana 4 solar 12"
        );
    }

    #[test]
    fn test_partial_words_not_rewritten() {
        // "avila" starts with "av"; "clave" starts with "cl"
        assert_eq!(expand_abbreviations("avila clave"), "avila clave");
        // trailing punctuation other than the period blocks the match
        assert_eq!(expand_abbreviations("av, amazonas"), "av, amazonas");
        // a token that merely ends in an abbreviation
        assert_eq!(expand_abbreviations("xav"), "xav");
    }

    #[test]
    fn test_no_unexpanded_token_remains() {
        for (abbr, full) in dictionary::ABBREVIATIONS {
            let out = expand_abbreviations(&format!("{} norte", abbr));
            assert_eq!(out, format!("{} norte", full));
            assert!(!out.split_whitespace().any(|t| t == *abbr));
        }
    }

    #[test]
    fn test_whitespace_trimmed_and_preserved_inside() {
        assert_eq!(expand_abbreviations("cll  10"), "calle  10");
        assert_eq!(
            normalizer().normalize("   pje  ruiz  ").as_str(),
            "pasaje  ruiz, Quito, Ecuador"
        );
    }

    #[test]
    fn test_scope_appended_once() {
        let n = normalizer();
        let once = n.normalize("la carolina");
        let twice = n.normalize(once.as_str());
        assert_eq!(once.as_str(), "la carolina, Quito, Ecuador");
        assert_eq!(twice.as_str(), "la carolina, quito, ecuador");
    }

    #[test]
    fn test_custom_region() {
        let n = Normalizer::new(["Bogotá", "Medellín"], "Bogotá", "Colombia");
        assert_eq!(n.normalize("cra 7").as_str(), "carrera 7, Bogotá, Colombia");
        assert_eq!(n.normalize("cra 7 medellín").as_str(), "carrera 7 medellín");
    }

    #[test]
    fn test_deterministic() {
        let n = normalizer();
        assert_eq!(n.normalize("edif. torres"), n.normalize("edif. torres"));
    }
}
