//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default geocoder request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default ISO country code searches are restricted to
pub const DEFAULT_COUNTRY_CODE: &str = "ec";

/// Default response language (matches the abbreviation dictionary)
pub const DEFAULT_LOCALE: &str = "es";

/// City appended to queries that name no known locality
pub const DEFAULT_CITY: &str = "Quito";

/// Country appended to queries that name no known locality
pub const DEFAULT_COUNTRY: &str = "Ecuador";

/// Cities that count as geographic context in a query
pub const DEFAULT_CITIES: &[&str] = &[
    "quito",
    "guayaquil",
    "cuenca",
    "ambato",
    "manta",
    "portoviejo",
    "machala",
    "loja",
    "riobamba",
    "ibarra",
    "esmeraldas",
    "santo domingo",
];

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7878;

/// Default URL provider
pub const DEFAULT_URL_PROVIDER: &str = "openstreetmap";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "event-locator";
