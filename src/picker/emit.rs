//! Result emitter
//!
//! `ResolvedLocation` is the only thing the booking form ever sees from the
//! picker. Coordinates are rounded here and nowhere earlier.

use crate::coord::Coordinates;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Committed location handed to the booking form
///
/// Serialized with the field names the reservations API expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    #[serde(rename = "latitud")]
    pub latitude: f64,
    #[serde(rename = "longitud")]
    pub longitude: f64,
    #[serde(rename = "direccion")]
    pub address: String,
}

impl ResolvedLocation {
    /// Package a position and its address, rounding the coordinates
    pub fn new(position: Coordinates, address: impl Into<String>) -> Self {
        let rounded = position.rounded();
        Self {
            latitude: rounded.lat,
            longitude: rounded.lng,
            address: address.into(),
        }
    }

    pub fn position(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Receiver of committed locations (the `onLocationChange` side of the picker)
pub trait LocationSink: Send {
    fn location_changed(&mut self, location: ResolvedLocation);
}

impl LocationSink for mpsc::UnboundedSender<ResolvedLocation> {
    fn location_changed(&mut self, location: ResolvedLocation) {
        // the host may have gone away; the picker keeps running regardless
        let _ = self.send(location);
    }
}

/// Adapts a closure into a `LocationSink`
pub struct OnLocationChange<F>(pub F);

impl<F> LocationSink for OnLocationChange<F>
where
    F: FnMut(ResolvedLocation) + Send,
{
    fn location_changed(&mut self, location: ResolvedLocation) {
        (self.0)(location)
    }
}
