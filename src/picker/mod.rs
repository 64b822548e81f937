//! Interactive address picker
//!
//! Lets a user locate an event address either by typing (debounced, normalized
//! forward search, then picking a suggestion) or by clicking/dragging on a
//! map (reverse geocoding). Both paths end in exactly one
//! [`ResolvedLocation`] per committed position, delivered to a
//! [`LocationSink`].
//!
//! [`LocationPicker`] is a single task that owns the [`PickerState`]. It
//! waits on three sources: user/map events from [`PickerHandle`]s, debounce
//! firings, and completions of network calls it spawned. Network tasks never
//! touch state; they only report back, so the state machine sees an
//! interleaved, strictly sequential stream of inputs.

pub mod emit;
pub mod map;
pub mod state;

pub use emit::{LocationSink, OnLocationChange, ResolvedLocation};
pub use map::{MapAdapter, MapCommand, RecordingMap};
pub use state::{Effect, Notice, Phase, PickerEvent, PickerOptions, PickerState, PickerView};

use crate::config::Config;
use crate::coord::Coordinates;
use crate::debounce::{Debouncer, Fired};
use crate::error::{Error, Result};
use crate::geo::reverse::resolve_address;
use crate::geo::{Candidate, GeoBackend, SearchOptions};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::debug;

/// Sends user and map events to a running picker
#[derive(Debug, Clone)]
pub struct PickerHandle {
    tx: mpsc::UnboundedSender<PickerEvent>,
}

impl PickerHandle {
    pub fn send(&self, event: PickerEvent) -> Result<()> {
        self.tx.send(event).map_err(|_| Error::PickerClosed)
    }

    pub fn input(&self, text: impl Into<String>) -> Result<()> {
        self.send(PickerEvent::Input(text.into()))
    }

    pub fn focus(&self) -> Result<()> {
        self.send(PickerEvent::Focus)
    }

    pub fn click_away(&self) -> Result<()> {
        self.send(PickerEvent::ClickAway)
    }

    pub fn pick(&self, index: usize) -> Result<()> {
        self.send(PickerEvent::Pick(index))
    }

    pub fn map_click(&self, position: Coordinates) -> Result<()> {
        self.send(PickerEvent::MapClick(position))
    }

    pub fn marker_drag_end(&self, position: Coordinates) -> Result<()> {
        self.send(PickerEvent::MarkerDragEnd(position))
    }

    pub fn edit_address(&self, text: impl Into<String>) -> Result<()> {
        self.send(PickerEvent::EditAddress(text.into()))
    }

    pub fn set_disabled(&self, disabled: bool) -> Result<()> {
        self.send(PickerEvent::SetDisabled(disabled))
    }

    pub fn reset(&self) -> Result<()> {
        self.send(PickerEvent::Reset)
    }
}

/// Results reported back by spawned network tasks
enum Completion {
    Search {
        seq: u64,
        result: Result<Vec<Candidate>>,
    },
    Address {
        seq: u64,
        position: Coordinates,
        address: String,
    },
}

pub struct LocationPicker<G, M, S> {
    backend: Arc<G>,
    map: M,
    sink: S,
    state: PickerState,
    search_options: SearchOptions,

    events: mpsc::UnboundedReceiver<PickerEvent>,
    debouncer: Debouncer<String>,
    debounced: mpsc::UnboundedReceiver<Fired<String>>,
    done_tx: mpsc::UnboundedSender<Completion>,
    done_rx: mpsc::UnboundedReceiver<Completion>,
    view_tx: watch::Sender<PickerView>,
}

impl<G, M, S> LocationPicker<G, M, S>
where
    G: GeoBackend + 'static,
    M: MapAdapter,
    S: LocationSink,
{
    /// Build a picker and the handle used to feed it events
    ///
    /// The picker does nothing until [`run`](Self::run) is awaited. It stops
    /// once every `PickerHandle` has been dropped.
    pub fn new(
        backend: Arc<G>,
        map: M,
        sink: S,
        config: &Config,
        options: PickerOptions,
    ) -> (Self, PickerHandle) {
        let (tx, events) = mpsc::unbounded_channel();
        let (debouncer, debounced) = Debouncer::new(config.picker.debounce());
        let (done_tx, done_rx) = mpsc::unbounded_channel();

        let state = PickerState::new(config, options);
        let (view_tx, _) = watch::channel(state.view());

        let picker = Self {
            backend,
            map,
            sink,
            state,
            search_options: SearchOptions::from_config(config),
            events,
            debouncer,
            debounced,
            done_tx,
            done_rx,
            view_tx,
        };
        (picker, PickerHandle { tx })
    }

    /// Subscribe to view snapshots, published after every state change
    pub fn subscribe(&self) -> watch::Receiver<PickerView> {
        self.view_tx.subscribe()
    }

    /// Process events until all handles are dropped
    pub async fn run(mut self) {
        let effects = self.state.mount();
        self.apply(effects);

        loop {
            let effects = tokio::select! {
                event = self.events.recv() => match event {
                    Some(event) => self.state.handle(event),
                    None => break,
                },
                Some(fired) = self.debounced.recv() => match self.debouncer.accept(fired) {
                    Some(text) => self.state.debounced(text),
                    None => Vec::new(),
                },
                Some(done) = self.done_rx.recv() => match done {
                    Completion::Search { seq, result } => self.state.search_completed(seq, result),
                    Completion::Address { seq, position, address } => {
                        self.state.address_resolved(seq, position, address)
                    }
                },
            };
            self.apply(effects);
            self.publish();
        }

        debug!("location picker stopped");
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Debounce(text) => self.debouncer.push(text),
                Effect::CancelDebounce => self.debouncer.cancel(),
                Effect::Search { seq, query } => {
                    let backend = Arc::clone(&self.backend);
                    let options = self.search_options.clone();
                    let done = self.done_tx.clone();
                    tokio::spawn(async move {
                        let result = backend.search(&query, &options).await;
                        let _ = done.send(Completion::Search { seq, result });
                    });
                }
                Effect::ReverseGeocode { seq, position } => {
                    let backend = Arc::clone(&self.backend);
                    let done = self.done_tx.clone();
                    tokio::spawn(async move {
                        let address = resolve_address(backend.as_ref(), position).await;
                        let _ = done.send(Completion::Address {
                            seq,
                            position,
                            address,
                        });
                    });
                }
                Effect::PlaceMarker(position) => self.map.place_marker(position),
                Effect::ClearMarker => self.map.clear_marker(),
                Effect::CenterMap { position, zoom } => self.map.center(position, zoom),
                Effect::Emit(location) => {
                    debug!(?location, "location committed");
                    self.sink.location_changed(location);
                }
            }
        }
    }

    fn publish(&self) {
        let view = self.state.view();
        self.view_tx.send_if_modified(|current| {
            if *current == view {
                false
            } else {
                *current = view;
                true
            }
        });
    }
}
