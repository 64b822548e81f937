//! Address resolution for a committed position
//!
//! Reverse geocoding never blocks a booking: any provider failure, or an
//! answer without a name, degrades to the coordinate label.

use crate::coord::Coordinates;
use crate::geo::GeoBackend;
use tracing::warn;

/// Display address for `position`, falling back to `"<lat>, <lng>"` at six decimals
pub async fn resolve_address<G: GeoBackend>(backend: &G, position: Coordinates) -> String {
    match backend.reverse_geocode(position).await {
        Ok(Some(name)) => name,
        Ok(None) => position.label(),
        Err(e) => {
            warn!(%position, error = %e, "reverse geocoding failed, using coordinates");
            position.label()
        }
    }
}
