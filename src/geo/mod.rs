//! Geocoding module
//!
//! Forward search (text to ranked candidates) and reverse geocoding
//! (coordinates to a display address) behind the `GeoBackend` trait.

pub mod nominatim;
pub mod reverse;

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::normalize::NormalizedQuery;
use serde::{Deserialize, Serialize};

/// One ranked search hit. The provider's order is authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Address as the provider renders it
    pub display_name: String,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
    /// Provider place identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<u64>,
    /// Place kind (e.g. "residential", "house")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Candidate {
    pub fn position(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

/// Scope applied to every forward search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// ISO country code results are restricted to
    pub country_code: String,
    /// Response language
    pub locale: String,
    /// Maximum number of candidates
    pub limit: usize,
}

impl SearchOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            country_code: config.region.country_code.clone(),
            locale: config.region.locale.clone(),
            limit: config.geocoder.result_limit,
        }
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Trait for geocoding backends
pub trait GeoBackend: Send + Sync {
    /// Search for candidates matching an already-normalized query
    ///
    /// An empty vector is a successful "no results" answer.
    fn search(
        &self,
        query: &NormalizedQuery,
        options: &SearchOptions,
    ) -> impl std::future::Future<Output = Result<Vec<Candidate>>> + Send;

    /// Reverse geocode coordinates to a display address
    ///
    /// Returns `None` when the provider answers without an address.
    fn reverse_geocode(
        &self,
        position: Coordinates,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
}

/// Build the geocoding backend described by the config
pub fn get_geocoder(config: &Config) -> crate::error::Result<nominatim::NominatimBackend> {
    nominatim::NominatimBackend::from_config(config)
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted in-memory backend and a fake Nominatim HTTP server

    use super::*;
    use crate::error::Error;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    pub fn candidate(name: &str, lat: f64, lng: f64) -> Candidate {
        Candidate {
            display_name: name.to_string(),
            lat,
            lng,
            place_id: None,
            kind: None,
        }
    }

    #[derive(Clone)]
    enum Reply<T> {
        Ok(T),
        Fail,
    }

    /// Backend whose answers and latencies are set up by the test
    #[derive(Clone, Default)]
    pub struct ScriptedBackend {
        searches: Arc<Mutex<HashMap<String, (Duration, Reply<Vec<Candidate>>)>>>,
        reverse: Arc<Mutex<Option<(Duration, Reply<Option<String>>)>>>,
        search_log: Arc<Mutex<Vec<String>>>,
        reverse_log: Arc<Mutex<Vec<Coordinates>>>,
    }

    impl ScriptedBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn on_search(&self, normalized: &str, delay_ms: u64, results: Vec<Candidate>) {
            self.searches.lock().unwrap().insert(
                normalized.to_string(),
                (Duration::from_millis(delay_ms), Reply::Ok(results)),
            );
        }

        pub fn fail_search(&self, normalized: &str) {
            self.searches
                .lock()
                .unwrap()
                .insert(normalized.to_string(), (Duration::ZERO, Reply::Fail));
        }

        pub fn on_reverse(&self, delay_ms: u64, address: Option<&str>) {
            *self.reverse.lock().unwrap() = Some((
                Duration::from_millis(delay_ms),
                Reply::Ok(address.map(str::to_string)),
            ));
        }

        pub fn fail_reverse(&self) {
            *self.reverse.lock().unwrap() = Some((Duration::ZERO, Reply::Fail));
        }

        pub fn searches(&self) -> Vec<String> {
            self.search_log.lock().unwrap().clone()
        }

        pub fn reverse_lookups(&self) -> Vec<Coordinates> {
            self.reverse_log.lock().unwrap().clone()
        }
    }

    impl GeoBackend for ScriptedBackend {
        async fn search(
            &self,
            query: &NormalizedQuery,
            _options: &SearchOptions,
        ) -> Result<Vec<Candidate>> {
            self.search_log.lock().unwrap().push(query.to_string());
            let scripted = self.searches.lock().unwrap().get(query.as_str()).cloned();
            let (delay, reply) = scripted.unwrap_or((Duration::ZERO, Reply::Ok(Vec::new())));
            tokio::time::sleep(delay).await;
            match reply {
                Reply::Ok(results) => Ok(results),
                Reply::Fail => Err(Error::Geo("scripted failure".to_string())),
            }
        }

        async fn reverse_geocode(&self, position: Coordinates) -> Result<Option<String>> {
            self.reverse_log.lock().unwrap().push(position);
            let scripted = self.reverse.lock().unwrap().clone();
            let (delay, reply) = scripted.unwrap_or((Duration::ZERO, Reply::Ok(None)));
            tokio::time::sleep(delay).await;
            match reply {
                Reply::Ok(address) => Ok(address),
                Reply::Fail => Err(Error::Geo("scripted failure".to_string())),
            }
        }
    }

    /// Serve `router` on an ephemeral local port and return its base URL
    pub async fn spawn_fake_provider(router: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_serialization() {
        let candidate = Candidate {
            display_name: "Avenida Amazonas, Quito, Ecuador".to_string(),
            lat: -0.1807,
            lng: -78.4678,
            place_id: Some(42),
            kind: None,
        };

        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["place_id"], 42);
        assert!(json.get("kind").is_none());

        let parsed: Candidate = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, candidate);
    }

    #[test]
    fn test_search_options_from_config() {
        let mut config = Config::default();
        config.region.country_code = "co".to_string();
        config.geocoder.result_limit = 3;

        let options = SearchOptions::from_config(&config);
        assert_eq!(options.country_code, "co");
        assert_eq!(options.locale, "es");
        assert_eq!(options.limit, 3);
    }
}
