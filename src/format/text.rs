//! Human-readable text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::geo::Candidate;
use crate::picker::ResolvedLocation;

/// Text formatter - numbered suggestion list and address summary
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format_candidates(&self, candidates: &[Candidate], _config: &Config) -> Result<String> {
        if candidates.is_empty() {
            return Ok("No results\n".to_string());
        }

        let mut output = String::new();
        for (i, candidate) in candidates.iter().enumerate() {
            output.push_str(&format!(
                "{:>2}. {}\n    ({:.6}, {:.6})\n",
                i, candidate.display_name, candidate.lat, candidate.lng
            ));
        }
        Ok(output)
    }

    fn format_location(&self, location: &ResolvedLocation, _config: &Config) -> Result<String> {
        Ok(format!(
            "Address: {}\nLatitude: {}\nLongitude: {}\n",
            location.address, location.latitude, location.longitude
        ))
    }
}
