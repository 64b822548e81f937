//! URL output formatter

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::OutputFormatter;
use crate::geo::Candidate;
use crate::picker::ResolvedLocation;

/// URL formatter - map links from the configured provider templates
pub struct UrlFormatter;

impl UrlFormatter {
    /// Format a location URL with optional provider override
    pub fn format_with_provider(
        &self,
        location: &ResolvedLocation,
        config: &Config,
        provider: Option<&str>,
    ) -> Result<String> {
        config.format_url(provider, location.latitude, location.longitude)
    }
}

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &str {
        "url"
    }

    fn description(&self) -> &str {
        "Map URL per result"
    }

    fn format_candidates(&self, candidates: &[Candidate], config: &Config) -> Result<String> {
        if candidates.is_empty() {
            return Err(Error::Geo("No results to link".to_string()));
        }

        let lines = candidates
            .iter()
            .map(|c| config.format_url(None, c.lat, c.lng))
            .collect::<Result<Vec<_>>>()?;
        Ok(lines.join("\n"))
    }

    fn format_location(&self, location: &ResolvedLocation, config: &Config) -> Result<String> {
        self.format_with_provider(location, config, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::fixtures;

    #[test]
    fn test_url_default_provider() {
        let output = UrlFormatter
            .format_location(&fixtures::location(), &Config::default())
            .unwrap();
        assert!(output.contains("openstreetmap.org"));
        assert!(output.contains("mlat=-0.1807"));
    }

    #[test]
    fn test_url_with_provider() {
        let output = UrlFormatter
            .format_with_provider(&fixtures::location(), &Config::default(), Some("google"))
            .unwrap();
        assert_eq!(output, "https://www.google.com/maps/@-0.1807,-78.4678,17z");
    }

    #[test]
    fn test_url_one_line_per_candidate() {
        let output = UrlFormatter
            .format_candidates(&fixtures::candidates(), &Config::default())
            .unwrap();
        assert_eq!(output.lines().count(), 2);
    }

    #[test]
    fn test_url_without_candidates() {
        assert!(UrlFormatter.format_candidates(&[], &Config::default()).is_err());
    }
}
