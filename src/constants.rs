//! Centralized constants for the event-locator crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Decimal places kept on coordinates handed to the booking form
    pub const COORD_PRECISION: i32 = 6;

    /// Map center used before any position is committed (Quito)
    pub const DEFAULT_CENTER_LAT: f64 = -0.1807;
    pub const DEFAULT_CENTER_LNG: f64 = -78.4678;
}

/// External API endpoints
pub mod api {
    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// Nominatim requires an identifying User-Agent
    pub const USER_AGENT: &str = concat!("event-locator/", env!("CARGO_PKG_VERSION"));
}

/// Picker behaviour
pub mod picker {
    /// Quiet period before a typed query is searched
    pub const DEBOUNCE_MS: u64 = 500;

    /// Shorter (trimmed) queries never reach the geocoder
    pub const MIN_QUERY_CHARS: usize = 3;

    /// Maximum number of candidates requested and displayed
    pub const MAX_CANDIDATES: usize = 5;

    /// Zoom level of the map before anything is selected
    pub const DEFAULT_ZOOM: u8 = 13;

    /// Zoom level the map flies to when a suggestion is picked
    pub const FOCUS_ZOOM: u8 = 16;
}
