//! Map adapter seam
//!
//! The picker drives whatever map widget the host renders through this
//! trait. Gestures flow the other way: the host's click and drag-end
//! listeners call [`PickerHandle::map_click`](super::PickerHandle::map_click)
//! and [`PickerHandle::marker_drag_end`](super::PickerHandle::marker_drag_end).

use crate::coord::Coordinates;
use serde::Serialize;
use std::sync::{Arc, Mutex};

/// Commands the picker issues to a map
pub trait MapAdapter: Send {
    /// Show the draggable marker at `position`, replacing any previous one
    fn place_marker(&mut self, position: Coordinates);

    /// Remove the marker
    fn clear_marker(&mut self);

    /// Move the viewport
    fn center(&mut self, position: Coordinates, zoom: u8);
}

/// A map command as recorded by [`RecordingMap`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum MapCommand {
    PlaceMarker { position: Coordinates },
    ClearMarker,
    Center { position: Coordinates, zoom: u8 },
}

/// Headless map that keeps a log of every command it receives
#[derive(Debug, Clone, Default)]
pub struct RecordingMap {
    log: Arc<Mutex<Vec<MapCommand>>>,
}

impl RecordingMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far
    pub fn commands(&self) -> Vec<MapCommand> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// Where the marker currently is, replaying the log
    pub fn marker(&self) -> Option<Coordinates> {
        self.commands()
            .into_iter()
            .fold(None, |marker, command| match command {
                MapCommand::PlaceMarker { position } => Some(position),
                MapCommand::ClearMarker => None,
                MapCommand::Center { .. } => marker,
            })
    }

    fn record(&self, command: MapCommand) {
        if let Ok(mut log) = self.log.lock() {
            log.push(command);
        }
    }
}

impl MapAdapter for RecordingMap {
    fn place_marker(&mut self, position: Coordinates) {
        self.record(MapCommand::PlaceMarker { position });
    }

    fn clear_marker(&mut self) {
        self.record(MapCommand::ClearMarker);
    }

    fn center(&mut self, position: Coordinates, zoom: u8) {
        self.record(MapCommand::Center { position, zoom });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_replay() {
        let mut map = RecordingMap::new();
        let observer = map.clone();
        assert_eq!(observer.marker(), None);

        map.place_marker(Coordinates::new(1.0, 2.0));
        map.center(Coordinates::new(1.0, 2.0), 16);
        map.place_marker(Coordinates::new(3.0, 4.0));
        assert_eq!(observer.marker(), Some(Coordinates::new(3.0, 4.0)));

        map.clear_marker();
        assert_eq!(observer.marker(), None);
        assert_eq!(observer.commands().len(), 4);
    }

    #[test]
    fn test_command_json() {
        let json = serde_json::to_value(MapCommand::Center {
            position: Coordinates::new(-0.1807, -78.4678),
            zoom: 13,
        })
        .unwrap();
        assert_eq!(json["command"], "center");
        assert_eq!(json["zoom"], 13);
    }
}
