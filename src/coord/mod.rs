//! Map positions
//!
//! A `Coordinates` value is the single source of truth for where the marker
//! sits. Full precision is kept internally; rounding happens only when a
//! location leaves the picker.

use crate::constants::geo::COORD_PRECISION;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }

    /// Parse the decimal strings geocoders return
    pub fn parse(lat: &str, lng: &str) -> Result<Self> {
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| Error::Geo(format!("Invalid latitude: {}", lat)))?;
        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|_| Error::Geo(format!("Invalid longitude: {}", lng)))?;
        Ok(Self { lat, lng })
    }

    /// Both components rounded to the output precision
    pub fn rounded(&self) -> Self {
        Self {
            lat: round_coord(self.lat),
            lng: round_coord(self.lng),
        }
    }

    /// `"<lat>, <lng>"` with six fixed decimals
    pub fn label(&self) -> String {
        let places = COORD_PRECISION as usize;
        format!("{:.*}, {:.*}", places, self.lat, places, self.lng)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// Round a coordinate component to `COORD_PRECISION` decimal places
///
/// Rounds the exact decimal value of `value`, the same digits `label`
/// prints, so `-0.1807035` becomes `-0.180703`.
pub fn round_coord(value: f64) -> f64 {
    format!("{:.*}", COORD_PRECISION as usize, value)
        .parse()
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_validate() {
        assert!(Coordinates::new(-0.18, -78.47).validate().is_ok());
        assert!(Coordinates::new(90.0, 180.0).validate().is_ok());
        assert!(Coordinates::new(91.0, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, -180.5).validate().is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).validate().is_err());
    }

    #[test]
    fn test_parse() {
        let c = Coordinates::parse("-0.1807000", "-78.4678000").unwrap();
        assert_relative_eq!(c.lat, -0.1807);
        assert_relative_eq!(c.lng, -78.4678);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Coordinates::parse("invalid", "0").is_err());
        assert!(Coordinates::parse("0", "").is_err());
    }

    #[test]
    fn test_round_coord() {
        assert_eq!(round_coord(-0.1807000), -0.1807);
        assert_eq!(round_coord(-78.46780049), -78.4678);
        assert_eq!(round_coord(1.23456789), 1.234568);
    }

    #[test]
    fn test_round_coord_half_way_values() {
        assert_eq!(round_coord(-0.1807035), -0.180703);
        assert_eq!(round_coord(-0.0000035), -0.000003);
    }

    #[test]
    fn test_rounded_agrees_with_label() {
        for (lat, lng) in [(-0.1807035, -78.47), (-0.0000035, 0.0000035), (12.3456785, -1.0)] {
            let position = Coordinates::new(lat, lng);
            let rounded = position.rounded();
            let label = position.label();
            let (label_lat, label_lng) = label.split_once(", ").unwrap();
            assert_eq!(rounded.lat, label_lat.parse::<f64>().unwrap(), "{}", label);
            assert_eq!(rounded.lng, label_lng.parse::<f64>().unwrap(), "{}", label);
        }
    }

    #[test]
    fn test_rounded_keeps_exact_six_places() {
        let c = Coordinates::new(-0.180_712_345, -78.467_891_234).rounded();
        assert_eq!(c, Coordinates::new(-0.180712, -78.467891));
    }

    #[test]
    fn test_label() {
        assert_eq!(Coordinates::new(-0.18, -78.47).label(), "-0.180000, -78.470000");
    }
}
