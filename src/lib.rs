//! event-locator: address lookup for event bookings
//!
//! A library and CLI tool that turns what a customer types (or where they
//! click on a map) into a geocoded event location for a booking form.
//!
//! ## Features
//!
//! - Query normalization with regional street abbreviations
//! - Debounced forward search against a Nominatim-compatible geocoder
//! - Reverse geocoding with a coordinate-label fallback
//! - Last-request-wins selection state machine
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use event_locator::{Coordinates, Normalizer, ResolvedLocation};
//!
//! let normalizer = Normalizer::default();
//! let query = normalizer.normalize("av amazonas");
//! assert_eq!(query.as_str(), "avenida amazonas, Quito, Ecuador");
//!
//! // What the booking form receives once a position is committed
//! let location = ResolvedLocation::new(Coordinates::new(-0.18071234, -78.4678), "Quito");
//! assert_eq!(location.latitude, -0.180712);
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod debounce;
pub mod error;
pub mod format;
pub mod geo;
pub mod normalize;
pub mod picker;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use geo::{Candidate, GeoBackend};
pub use normalize::{NormalizedQuery, Normalizer};
pub use picker::{LocationPicker, PickerHandle, ResolvedLocation};
