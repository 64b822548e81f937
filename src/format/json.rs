//! JSON output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::geo::Candidate;
use crate::picker::ResolvedLocation;

/// JSON formatter - pretty-printed, locations in the booking wire format
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON"
    }

    fn format_candidates(&self, candidates: &[Candidate], _config: &Config) -> Result<String> {
        Ok(serde_json::to_string_pretty(candidates)?)
    }

    fn format_location(&self, location: &ResolvedLocation, _config: &Config) -> Result<String> {
        Ok(serde_json::to_string_pretty(location)?)
    }
}
