//! Server shared state
//!
//! Holds configuration and the geocoder shared by all requests.

use crate::config::Config;
use crate::error::Result;
use crate::geo::nominatim::NominatimBackend;
use crate::geo::{get_geocoder, SearchOptions};
use crate::normalize::Normalizer;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Config,

    /// Geocoding provider client
    pub geocoder: NominatimBackend,

    /// Query normalizer for the configured region
    pub normalizer: Normalizer,

    /// Scope applied to forward searches
    pub search_options: SearchOptions,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config) -> Result<Self> {
        let geocoder = get_geocoder(&config)?;
        Ok(Self {
            normalizer: Normalizer::from_region(&config.region),
            search_options: SearchOptions::from_config(&config),
            geocoder,
            config,
        })
    }

    /// Whether a raw query is long enough to be searched
    pub fn searchable(&self, raw: &str) -> bool {
        raw.trim().chars().count() >= self.config.picker.min_query_chars
    }
}
