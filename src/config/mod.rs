//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/event-locator/config.toml

pub mod defaults;

use crate::constants::{api, geo, picker};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Geocoding provider settings
    #[serde(default)]
    pub geocoder: GeocoderConfig,

    /// Service area and language
    #[serde(default)]
    pub region: RegionConfig,

    /// Interactive picker tuning
    #[serde(default)]
    pub picker: PickerConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Map link settings
    #[serde(default)]
    pub url: UrlConfig,
}

/// Geocoding provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Base URL of the Nominatim-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum candidates per search
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
}

/// Service area and language
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionConfig {
    /// ISO 3166-1 alpha-2 code searches are restricted to
    #[serde(default = "default_country_code")]
    pub country_code: String,

    /// Response language (Accept-Language)
    #[serde(default = "default_locale")]
    pub locale: String,

    /// City appended when a query names no locality
    #[serde(default = "default_city")]
    pub default_city: String,

    /// Country appended when a query names no locality
    #[serde(default = "default_country")]
    pub default_country: String,

    /// Known city names (lower-case)
    #[serde(default = "default_cities")]
    pub cities: Vec<String>,

    /// Initial map center latitude
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,

    /// Initial map center longitude
    #[serde(default = "default_center_lng")]
    pub center_lng: f64,
}

/// Interactive picker tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Quiet period before a typed query is searched
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Minimum trimmed query length that triggers a search
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,

    /// Zoom before anything is selected
    #[serde(default = "default_zoom")]
    pub default_zoom: u8,

    /// Zoom used when flying to a picked suggestion
    #[serde(default = "default_focus_zoom")]
    pub focus_zoom: u8,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// URL generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default URL provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// URL provider templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

// Default value functions for serde
fn default_base_url() -> String {
    api::NOMINATIM_URL.to_string()
}
fn default_user_agent() -> String {
    api::USER_AGENT.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_result_limit() -> usize {
    picker::MAX_CANDIDATES
}
fn default_country_code() -> String {
    DEFAULT_COUNTRY_CODE.to_string()
}
fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}
fn default_city() -> String {
    DEFAULT_CITY.to_string()
}
fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}
fn default_cities() -> Vec<String> {
    DEFAULT_CITIES.iter().map(|c| c.to_string()).collect()
}
fn default_center_lat() -> f64 {
    geo::DEFAULT_CENTER_LAT
}
fn default_center_lng() -> f64 {
    geo::DEFAULT_CENTER_LNG
}
fn default_debounce_ms() -> u64 {
    picker::DEBOUNCE_MS
}
fn default_min_query_chars() -> usize {
    picker::MIN_QUERY_CHARS
}
fn default_zoom() -> u8 {
    picker::DEFAULT_ZOOM
}
fn default_focus_zoom() -> u8 {
    picker::FOCUS_ZOOM
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/@{lat},{lng},17z".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/?mlat={lat}&mlon={lng}#map=18/{lat}/{lng}".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?ll={lat},{lng}".to_string(),
    );
    providers
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
            result_limit: default_result_limit(),
        }
    }
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            country_code: default_country_code(),
            locale: default_locale(),
            default_city: default_city(),
            default_country: default_country(),
            cities: default_cities(),
            center_lat: default_center_lat(),
            center_lng: default_center_lng(),
        }
    }
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_query_chars: default_min_query_chars(),
            default_zoom: default_zoom(),
            focus_zoom: default_focus_zoom(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

impl RegionConfig {
    /// Initial map center
    pub fn center(&self) -> Coordinates {
        Coordinates::new(self.center_lat, self.center_lng)
    }
}

impl PickerConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["geocoder", "base_url"] => Some(self.geocoder.base_url.clone()),
            ["geocoder", "user_agent"] => Some(self.geocoder.user_agent.clone()),
            ["geocoder", "timeout_secs"] => Some(self.geocoder.timeout_secs.to_string()),
            ["geocoder", "result_limit"] => Some(self.geocoder.result_limit.to_string()),

            ["region", "country_code"] => Some(self.region.country_code.clone()),
            ["region", "locale"] => Some(self.region.locale.clone()),
            ["region", "default_city"] => Some(self.region.default_city.clone()),
            ["region", "default_country"] => Some(self.region.default_country.clone()),
            ["region", "cities"] => Some(self.region.cities.join(",")),
            ["region", "center_lat"] => Some(self.region.center_lat.to_string()),
            ["region", "center_lng"] => Some(self.region.center_lng.to_string()),

            ["picker", "debounce_ms"] => Some(self.picker.debounce_ms.to_string()),
            ["picker", "min_query_chars"] => Some(self.picker.min_query_chars.to_string()),
            ["picker", "default_zoom"] => Some(self.picker.default_zoom.to_string()),
            ["picker", "focus_zoom"] => Some(self.picker.focus_zoom.to_string()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["url", "default"] => Some(self.url.default.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["geocoder", "base_url"] => {
                self.geocoder.base_url = value.trim_end_matches('/').to_string();
            }
            ["geocoder", "user_agent"] => {
                self.geocoder.user_agent = value.to_string();
            }
            ["geocoder", "timeout_secs"] => {
                self.geocoder.timeout_secs = parse_value(value, "timeout")?;
            }
            ["geocoder", "result_limit"] => {
                self.geocoder.result_limit = parse_value(value, "result limit")?;
            }

            ["region", "country_code"] => {
                self.region.country_code = value.to_lowercase();
            }
            ["region", "locale"] => {
                self.region.locale = value.to_string();
            }
            ["region", "default_city"] => {
                self.region.default_city = value.to_string();
            }
            ["region", "default_country"] => {
                self.region.default_country = value.to_string();
            }
            ["region", "cities"] => {
                self.region.cities = value
                    .split(',')
                    .map(|c| c.trim().to_lowercase())
                    .filter(|c| !c.is_empty())
                    .collect();
            }
            ["region", "center_lat"] => {
                self.region.center_lat = parse_value(value, "latitude")?;
            }
            ["region", "center_lng"] => {
                self.region.center_lng = parse_value(value, "longitude")?;
            }

            ["picker", "debounce_ms"] => {
                self.picker.debounce_ms = parse_value(value, "debounce")?;
            }
            ["picker", "min_query_chars"] => {
                self.picker.min_query_chars = parse_value(value, "query length")?;
            }
            ["picker", "default_zoom"] => {
                self.picker.default_zoom = parse_value(value, "zoom")?;
            }
            ["picker", "focus_zoom"] => {
                self.picker.focus_zoom = parse_value(value, "zoom")?;
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = parse_value(value, "port")?;
            }

            ["url", "default"] => {
                self.url.default = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "geocoder.base_url",
            "geocoder.user_agent",
            "geocoder.timeout_secs",
            "geocoder.result_limit",
            "region.country_code",
            "region.locale",
            "region.default_city",
            "region.default_country",
            "region.cities",
            "region.center_lat",
            "region.center_lng",
            "picker.debounce_ms",
            "picker.min_query_chars",
            "picker.default_zoom",
            "picker.focus_zoom",
            "server.host",
            "server.port",
            "url.default",
        ]
    }

    /// Format a URL using the specified provider
    ///
    /// Replaces {lat} and {lng} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, lat: f64, lng: f64) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self.url.providers.get(provider_name).ok_or_else(|| {
            Error::Config(format!("Unknown URL provider: {}", provider_name))
        })?;

        Ok(template
            .replace("{lat}", &lat.to_string())
            .replace("{lng}", &lng.to_string()))
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_value<T: std::str::FromStr>(value: &str, what: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {} value: {}", what, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn with_temp_config<F: FnOnce()>(f: F) {
        let temp_dir = TempDir::new().unwrap();
        env::set_var("XDG_CONFIG_HOME", temp_dir.path());
        f();
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.geocoder.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.geocoder.result_limit, 5);
        assert_eq!(config.region.country_code, "ec");
        assert_eq!(config.region.locale, "es");
        assert_eq!(config.region.cities.len(), 12);
        assert_eq!(config.picker.debounce_ms, 500);
        assert_eq!(config.picker.min_query_chars, 3);
        assert_eq!(config.server.port, 7878);
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("region.default_city"), Some("Quito".to_string()));

        config.set("region.default_city", "Cuenca").unwrap();
        assert_eq!(config.get("region.default_city"), Some("Cuenca".to_string()));

        config.set("picker.debounce_ms", "250").unwrap();
        assert_eq!(config.picker.debounce(), Duration::from_millis(250));
    }

    #[test]
    fn test_set_base_url_strips_trailing_slash() {
        let mut config = Config::default();
        config.set("geocoder.base_url", "http://localhost:8080/").unwrap();
        assert_eq!(config.geocoder.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_set_cities_list() {
        let mut config = Config::default();
        config.set("region.cities", "Quito, Tena ,,Puyo").unwrap();
        assert_eq!(config.region.cities, vec!["quito", "tena", "puyo"]);
        assert_eq!(config.get("region.cities"), Some("quito,tena,puyo".to_string()));
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_value() {
        let mut config = Config::default();
        assert!(config.set("server.port", "not_a_port").is_err());
        assert!(config.set("picker.debounce_ms", "-5").is_err());
    }

    #[test]
    fn test_format_url() {
        let config = Config::default();

        let url = config.format_url(Some("google"), -0.1807, -78.4678).unwrap();
        assert_eq!(url, "https://www.google.com/maps/@-0.1807,-78.4678,17z");

        let url = config.format_url(None, -0.1807, -78.4678).unwrap();
        assert!(url.starts_with("https://www.openstreetmap.org/?mlat=-0.1807&mlon=-78.4678"));
    }

    #[test]
    fn test_format_url_unknown_provider() {
        let config = Config::default();
        assert!(config.format_url(Some("unknown"), 0.0, 0.0).is_err());
    }

    #[test]
    fn test_save_and_load() {
        with_temp_config(|| {
            let mut config = Config::default();
            config.region.default_city = "Guayaquil".to_string();
            config.geocoder.base_url = "http://127.0.0.1:9000".to_string();
            config.save().unwrap();

            let loaded = Config::load().unwrap();
            assert_eq!(loaded.region.default_city, "Guayaquil");
            assert_eq!(loaded.geocoder.base_url, "http://127.0.0.1:9000");
        });
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: Config = toml::from_str("[picker]\ndebounce_ms = 300\n").unwrap();
        assert_eq!(loaded.picker.debounce_ms, 300);
        assert_eq!(loaded.picker.min_query_chars, 3);
        assert_eq!(loaded.region.default_country, "Ecuador");
    }

    #[test]
    fn test_serialization_format() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[geocoder]"));
        assert!(toml.contains("[region]"));
        assert!(toml.contains("[picker]"));
        assert!(toml.contains("[url.providers]"));
    }

    #[test]
    fn test_region_center() {
        let config = Config::default();
        assert_eq!(config.region.center(), Coordinates::new(-0.1807, -78.4678));
    }

    #[test]
    fn test_available_keys_resolve() {
        let config = Config::default();
        for key in Config::available_keys() {
            assert!(config.get(key).is_some(), "key {} has no value", key);
        }
    }
}
