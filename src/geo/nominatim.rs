//! Nominatim geocoding backend (OpenStreetMap)
//!
//! Forward search:  GET {base}/search?format=json&q=..&limit=..&countrycodes=..&addressdetails=1
//! Reverse lookup:  GET {base}/reverse?format=json&lat=..&lon=..&addressdetails=1
//!
//! Both send `Accept-Language` so names come back in the dictionary's locale.
//! Nominatim's usage policy requires an identifying User-Agent.

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{Candidate, GeoBackend, SearchOptions};
use crate::normalize::NormalizedQuery;
use reqwest::header::ACCEPT_LANGUAGE;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Nominatim geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimBackend {
    client: reqwest::Client,
    base_url: String,
    locale: String,
}

/// Nominatim search response item
#[derive(Debug, Deserialize)]
struct SearchItem {
    lat: String,
    lon: String,
    display_name: String,
    #[serde(default)]
    place_id: Option<u64>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

/// Nominatim reverse response
///
/// Failed lookups still answer 200 with `{"error": "..."}` and no name.
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl NominatimBackend {
    /// Create a backend from the `[geocoder]` and `[region]` config sections
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_base_url(
            &config.geocoder.base_url,
            &config.geocoder.user_agent,
            &config.region.locale,
            Duration::from_secs(config.geocoder.timeout_secs),
        )
    }

    /// Create a backend against any Nominatim-compatible endpoint
    pub fn with_base_url(
        base_url: &str,
        user_agent: &str,
        locale: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            locale: locale.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn search_url(&self, query: &NormalizedQuery, options: &SearchOptions) -> String {
        format!(
            "{}/search?format=json&q={}&limit={}&countrycodes={}&addressdetails=1",
            self.base_url,
            urlencoding::encode(query.as_str()),
            options.limit,
            urlencoding::encode(&options.country_code),
        )
    }

    fn reverse_url(&self, position: Coordinates) -> String {
        format!(
            "{}/reverse?format=json&lat={}&lon={}&addressdetails=1",
            self.base_url, position.lat, position.lng
        )
    }

    async fn get(&self, url: &str, locale: &str) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT_LANGUAGE, locale)
            .send()
            .await
            .map_err(|e| Error::Geo(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geo(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        Ok(response)
    }
}

impl GeoBackend for NominatimBackend {
    async fn search(
        &self,
        query: &NormalizedQuery,
        options: &SearchOptions,
    ) -> Result<Vec<Candidate>> {
        let url = self.search_url(query, options);
        debug!(%url, "forward search");

        let items: Vec<SearchItem> = self
            .get(&url, &options.locale)
            .await?
            .json()
            .await
            .map_err(|e| Error::Geo(format!("Failed to parse Nominatim response: {}", e)))?;

        items
            .into_iter()
            .take(options.limit)
            .map(|item| {
                let position = Coordinates::parse(&item.lat, &item.lon)?;
                position
                    .validate()
                    .map_err(|e| Error::Geo(format!("Unusable search result: {}", e)))?;
                Ok(Candidate {
                    display_name: item.display_name,
                    lat: position.lat,
                    lng: position.lng,
                    place_id: item.place_id,
                    kind: item.kind,
                })
            })
            .collect()
    }

    async fn reverse_geocode(&self, position: Coordinates) -> Result<Option<String>> {
        let url = self.reverse_url(position);
        debug!(%url, "reverse geocode");

        let result: ReverseResponse = self
            .get(&url, &self.locale)
            .await?
            .json()
            .await
            .map_err(|e| Error::Geo(format!("Failed to parse Nominatim response: {}", e)))?;

        if let Some(err) = &result.error {
            debug!(error = %err, "reverse geocode returned no address");
        }

        Ok(result.display_name.filter(|name| !name.trim().is_empty()))
    }
}
