//! Selection/interaction state machine
//!
//! Pure and synchronous: every input mutates the state and returns the
//! effects the driver must carry out. Nothing here touches the network,
//! timers or the map directly.
//!
//! ```text
//! Idle ──debounced query──▶ Searching ──≥1 candidate──▶ SuggestionsVisible
//!   ▲                           │                              │
//!   └──short query / no hits────┘            pick / map click / drag
//!                                                              ▼
//!                          reset ◀──────────────────────── PositionSet
//! ```
//!
//! Every forward search and every committed position carries a sequence
//! number. Responses are applied only when they answer the latest one.

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Error;
use crate::geo::Candidate;
use crate::normalize::{NormalizedQuery, Normalizer};
use crate::picker::emit::ResolvedLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Where the picker is in its interaction cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing committed, no search activity
    Idle,
    /// A debounced query is with the geocoder
    Searching,
    /// Candidates are available for picking
    SuggestionsVisible,
    /// A marker is placed; its address may still be resolving
    PositionSet,
}

/// Inline advisory shown under the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// The geocoder answered but found nothing
    NoResults,
    /// The geocoder was unreachable or answered with an error
    SearchFailed,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoResults => write!(
                f,
                "No se encontraron resultados. Intenta con otra búsqueda o haz clic en el mapa."
            ),
            Self::SearchFailed => write!(f, "Error buscando dirección. Intenta de nuevo."),
        }
    }
}

/// What the host passes in when mounting the picker
#[derive(Debug, Clone, Default)]
pub struct PickerOptions {
    /// Address shown before anything is selected
    pub initial_address: Option<String>,
    /// Ignore all user interaction
    pub disabled: bool,
}

/// User and map events
#[derive(Debug, Clone, PartialEq)]
pub enum PickerEvent {
    /// Search field changed
    Input(String),
    /// Search field focused
    Focus,
    /// Click outside the suggestion panel
    ClickAway,
    /// Suggestion at this index chosen
    Pick(usize),
    /// Map clicked
    MapClick(Coordinates),
    /// Marker dropped after a drag
    MarkerDragEnd(Coordinates),
    /// Address text edited by hand
    EditAddress(String),
    SetDisabled(bool),
    /// Host form reopened or cleared
    Reset,
}

/// Work the driver performs on behalf of the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Restart the debounce timer with this text
    Debounce(String),
    /// Drop any pending debounced text
    CancelDebounce,
    /// Forward search
    Search { seq: u64, query: NormalizedQuery },
    /// Resolve an address for a committed position
    ReverseGeocode { seq: u64, position: Coordinates },
    PlaceMarker(Coordinates),
    ClearMarker,
    CenterMap { position: Coordinates, zoom: u8 },
    /// Hand a location to the booking form
    Emit(ResolvedLocation),
}

/// Snapshot published to the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickerView {
    pub phase: Phase,
    pub query: String,
    pub candidates: Vec<Candidate>,
    pub suggestions_visible: bool,
    pub position: Option<Coordinates>,
    pub address: String,
    pub notice: Option<Notice>,
    pub searching: bool,
    pub geocoding: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone)]
pub struct PickerState {
    normalizer: Normalizer,
    min_query_chars: usize,
    max_candidates: usize,
    default_center: Coordinates,
    default_zoom: u8,
    focus_zoom: u8,

    phase: Phase,
    query: String,
    candidates: Vec<Candidate>,
    panel_open: bool,
    position: Option<Coordinates>,
    address: String,
    notice: Option<Notice>,
    searching: bool,
    geocoding: bool,
    disabled: bool,

    search_seq: u64,
    commit_seq: u64,
}

impl PickerState {
    pub fn new(config: &Config, options: PickerOptions) -> Self {
        Self {
            normalizer: Normalizer::from_region(&config.region),
            min_query_chars: config.picker.min_query_chars,
            max_candidates: config.geocoder.result_limit,
            default_center: config.region.center(),
            default_zoom: config.picker.default_zoom,
            focus_zoom: config.picker.focus_zoom,

            phase: Phase::Idle,
            query: String::new(),
            candidates: Vec::new(),
            panel_open: false,
            position: None,
            address: options.initial_address.unwrap_or_default(),
            notice: None,
            searching: false,
            geocoding: false,
            disabled: options.disabled,

            search_seq: 0,
            commit_seq: 0,
        }
    }

    /// Effects to run once when the picker is mounted
    pub fn mount(&self) -> Vec<Effect> {
        vec![Effect::CenterMap {
            position: self.default_center,
            zoom: self.default_zoom,
        }]
    }

    /// Dispatch a user or map event
    pub fn handle(&mut self, event: PickerEvent) -> Vec<Effect> {
        match event {
            PickerEvent::SetDisabled(disabled) => return self.set_disabled(disabled),
            PickerEvent::Reset => return self.reset(),
            PickerEvent::ClickAway => return self.click_away(),
            _ if self.disabled => {
                debug!(?event, "picker disabled, ignoring event");
                return Vec::new();
            }
            _ => {}
        }

        match event {
            PickerEvent::Input(text) => self.input(text),
            PickerEvent::Focus => self.focus(),
            PickerEvent::Pick(index) => self.pick(index),
            PickerEvent::MapClick(position) | PickerEvent::MarkerDragEnd(position) => {
                self.commit_from_map(position)
            }
            PickerEvent::EditAddress(text) => {
                self.address = text;
                Vec::new()
            }
            PickerEvent::SetDisabled(_) | PickerEvent::Reset | PickerEvent::ClickAway => {
                Vec::new()
            }
        }
    }

    /// The search field changed
    pub fn input(&mut self, text: String) -> Vec<Effect> {
        if self.long_enough(&text) {
            self.panel_open = true;
        }
        self.query = text.clone();
        vec![Effect::Debounce(text)]
    }

    /// The debounce timer let `text` through
    pub fn debounced(&mut self, text: String) -> Vec<Effect> {
        // any newer intent supersedes an in-flight search
        self.search_seq += 1;

        if !self.long_enough(&text) {
            self.searching = false;
            self.candidates.clear();
            self.panel_open = false;
            self.notice = None;
            self.phase = self.resting_phase();
            return Vec::new();
        }

        self.searching = true;
        self.notice = None;
        self.phase = Phase::Searching;

        let query = self.normalizer.normalize(&text);
        debug!(seq = self.search_seq, %query, "searching");
        vec![Effect::Search {
            seq: self.search_seq,
            query,
        }]
    }

    /// A forward search finished
    pub fn search_completed(
        &mut self,
        seq: u64,
        result: Result<Vec<Candidate>, Error>,
    ) -> Vec<Effect> {
        if seq != self.search_seq {
            debug!(seq, latest = self.search_seq, "discarding stale search response");
            return Vec::new();
        }

        self.searching = false;
        match result {
            Ok(mut candidates) if !candidates.is_empty() => {
                candidates.truncate(self.max_candidates);
                self.candidates = candidates;
                self.panel_open = true;
                self.phase = Phase::SuggestionsVisible;
            }
            Ok(_) => {
                self.candidates.clear();
                self.panel_open = false;
                self.notice = Some(Notice::NoResults);
                self.phase = self.resting_phase();
            }
            Err(e) => {
                warn!(error = %e, "address search failed");
                self.candidates.clear();
                self.panel_open = false;
                self.notice = Some(Notice::SearchFailed);
                self.phase = self.resting_phase();
            }
        }
        Vec::new()
    }

    /// A suggestion was chosen
    pub fn pick(&mut self, index: usize) -> Vec<Effect> {
        let Some(candidate) = self.candidates.get(index).cloned() else {
            debug!(index, available = self.candidates.len(), "pick out of range");
            return Vec::new();
        };

        let position = candidate.position();
        if let Err(e) = position.validate() {
            warn!(error = %e, "ignoring suggestion");
            return Vec::new();
        }
        self.query = candidate.display_name;

        let mut effects = vec![
            Effect::CancelDebounce,
            Effect::CenterMap {
                position,
                zoom: self.focus_zoom,
            },
        ];
        effects.extend(self.commit(position));
        effects
    }

    /// The reverse lookup for commit `seq` produced `address`
    pub fn address_resolved(
        &mut self,
        seq: u64,
        position: Coordinates,
        address: String,
    ) -> Vec<Effect> {
        if seq != self.commit_seq {
            debug!(seq, latest = self.commit_seq, "position superseded, not emitting");
            return Vec::new();
        }

        self.geocoding = false;
        self.address = address.clone();
        vec![Effect::Emit(ResolvedLocation::new(position, address))]
    }

    pub fn click_away(&mut self) -> Vec<Effect> {
        self.panel_open = false;
        Vec::new()
    }

    pub fn focus(&mut self) -> Vec<Effect> {
        if !self.candidates.is_empty() {
            self.panel_open = true;
        }
        Vec::new()
    }

    pub fn set_disabled(&mut self, disabled: bool) -> Vec<Effect> {
        self.disabled = disabled;
        if disabled {
            vec![Effect::CancelDebounce]
        } else {
            Vec::new()
        }
    }

    /// Back to a fresh picker; in-flight responses are orphaned
    pub fn reset(&mut self) -> Vec<Effect> {
        self.search_seq += 1;
        self.commit_seq += 1;

        self.phase = Phase::Idle;
        self.query.clear();
        self.candidates.clear();
        self.panel_open = false;
        self.position = None;
        self.address.clear();
        self.notice = None;
        self.searching = false;
        self.geocoding = false;

        vec![
            Effect::CancelDebounce,
            Effect::ClearMarker,
            Effect::CenterMap {
                position: self.default_center,
                zoom: self.default_zoom,
            },
        ]
    }

    pub fn view(&self) -> PickerView {
        PickerView {
            phase: self.phase,
            query: self.query.clone(),
            candidates: self.candidates.clone(),
            suggestions_visible: self.panel_open && !self.candidates.is_empty(),
            position: self.position,
            address: self.address.clone(),
            notice: self.notice,
            searching: self.searching,
            geocoding: self.geocoding,
            disabled: self.disabled,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn commit_from_map(&mut self, position: Coordinates) -> Vec<Effect> {
        if let Err(e) = position.validate() {
            warn!(error = %e, "ignoring map position");
            return Vec::new();
        }
        self.commit(position)
    }

    fn commit(&mut self, position: Coordinates) -> Vec<Effect> {
        self.position = Some(position);
        self.candidates.clear();
        self.panel_open = false;
        // suggestions still in flight no longer apply
        self.search_seq += 1;
        self.searching = false;

        self.commit_seq += 1;
        self.geocoding = true;
        self.notice = None;
        self.phase = Phase::PositionSet;

        vec![
            Effect::PlaceMarker(position),
            Effect::ReverseGeocode {
                seq: self.commit_seq,
                position,
            },
        ]
    }

    fn long_enough(&self, text: &str) -> bool {
        text.trim().chars().count() >= self.min_query_chars
    }

    fn resting_phase(&self) -> Phase {
        if self.position.is_some() {
            Phase::PositionSet
        } else {
            Phase::Idle
        }
    }
}
