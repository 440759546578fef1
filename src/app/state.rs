//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the single source of truth for the active
//! location, filters, results and selection. It is mutated only by
//! [`super::handle_event`]; renderers read [`AppState::compute_viewmodel`].
//!
//! # State Components
//!
//! - **Phase**: Where the coordinator is in the location/search lifecycle
//! - **Location**: Active coordinate, its label and the location mode
//! - **Pin draft**: Uncommitted pin position while pin editing is active
//! - **Filters**: Radius, categories and budget
//! - **Results**: The latest applied result set, unique by place id
//! - **Sequences**: Latest issued ticket per operation class
//! - **Sync**: Selection shared by map, list and detail panel
//!
//! # Example
//!
//! ```rust
//! use foodfinder::{AppState, Config};
//! use foodfinder::app::SearchPhase;
//!
//! let state = AppState::new(Config::default());
//! assert_eq!(state.phase, SearchPhase::Idle);
//! let viewmodel = state.compute_viewmodel();
//! assert!(viewmodel.items.is_empty());
//! ```

use super::actions::{Action, Continuation};
use super::modes::SearchPhase;
use super::sequence::{OpClass, SequenceBook};
use crate::domain::{Coordinate, LocationState, PinDraft, RestaurantResult};
use crate::search::{FilterState, RequestInputs, SearchRequest};
use crate::ui::messages::{self, Notice};
use crate::ui::sync::{derive_markers, ViewSync};
use crate::ui::viewmodel::{result_header, DetailPanel, ListItem, LocationBar, MenuLine, UIViewModel};
use crate::Config;
use std::collections::HashSet;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub phase: SearchPhase,

    pub location: LocationState,

    /// Present only while pin editing is active.
    pub pin_draft: Option<PinDraft>,

    pub filters: FilterState,

    /// Free-text search query as typed.
    pub query: String,

    /// Address entry text as typed.
    pub address_query: String,

    pub results: Vec<RestaurantResult>,

    /// Whether any search has completed successfully.
    pub has_results: bool,

    pub notice: Option<Notice>,

    pub sequences: SequenceBook,

    pub sync: ViewSync,

    /// Whether a forward geocode is in flight.
    pub address_lookup_in_flight: bool,

    /// Set once the user has committed a location (pin or address); the
    /// device fix no longer moves it.
    pub user_located: bool,

    /// Follow-up owed once the latest reverse geocode is applied. Survives a
    /// tracking lookup superseding the one that requested it.
    pub pending_continuation: Option<Continuation>,

    pub config: Config,
}

impl AppState {
    /// Creates idle state positioned at the configured fallback point.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let location = LocationState::pending(config.fallback_coordinate(), &config.pending_label);
        let filters = FilterState::new(config.default_radius, config.radius_bounds());

        Self {
            phase: SearchPhase::Idle,
            location,
            pin_draft: None,
            filters,
            query: String::new(),
            address_query: String::new(),
            results: Vec::new(),
            has_results: false,
            notice: None,
            sequences: SequenceBook::default(),
            sync: ViewSync::default(),
            address_lookup_in_flight: false,
            user_located: false,
            pending_continuation: None,
            config,
        }
    }

    #[must_use]
    pub const fn pin_editing(&self) -> bool {
        self.pin_draft.is_some()
    }

    /// Derives the request for a search from current state.
    ///
    /// An override location replaces the active coordinate; the hint is then
    /// taken only from `override_hint`, since the active label describes a
    /// different point.
    #[must_use]
    pub fn build_search_request(
        &self,
        override_location: Option<Coordinate>,
        override_hint: Option<&str>,
    ) -> SearchRequest {
        let coordinate = override_location.unwrap_or(self.location.coordinate);
        let location_hint = match (override_location, override_hint) {
            (_, Some(hint)) => Some(hint),
            (Some(_), None) => None,
            (None, None) => self.location.location_hint(),
        };

        SearchRequest::build(&RequestInputs {
            coordinate,
            location_hint,
            filters: self.filters.criteria(),
            query: &self.query,
            default_query: &self.config.default_query,
            vocabulary: &self.config.region,
        })
    }

    /// Issues a search ticket, enters `Searching` and returns the action.
    pub fn issue_search(&mut self, override_location: Option<Coordinate>, override_hint: Option<&str>) -> Action {
        let request = self.build_search_request(override_location, override_hint);
        let ticket = self.sequences.issue(OpClass::Search);

        tracing::debug!(
            ticket = %ticket,
            query = %request.query_text,
            radius = request.radius_meters,
            "search issued"
        );

        self.phase = SearchPhase::Searching;
        self.notice = None;
        Action::Search { ticket, request }
    }

    /// Replaces the result set, keeping the first occurrence of each place id.
    pub fn apply_results(&mut self, results: Vec<RestaurantResult>) {
        let received = results.len();
        let mut seen = HashSet::new();
        self.results = results
            .into_iter()
            .filter(|result| seen.insert(result.place_id.clone()))
            .collect();

        if self.results.len() != received {
            tracing::debug!(
                received,
                kept = self.results.len(),
                "duplicate place ids collapsed"
            );
        }

        self.has_results = true;
        self.sync.retain_in(&self.results);
    }

    /// Computes the view model for the current state.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        let selected = self.sync.selection.selected_place_id.as_deref();

        let busy = match self.phase {
            SearchPhase::ResolvingLocation => Some(messages::LOCATION_PENDING.to_string()),
            SearchPhase::Searching => Some(messages::SEARCHING.to_string()),
            _ => None,
        };

        let header = self
            .has_results
            .then(|| result_header(self.results.len(), self.filters.criteria().budget));

        let empty_state = (self.has_results && self.results.is_empty() && self.phase == SearchPhase::Results)
            .then(|| messages::NO_RESULTS.to_string());

        let items = self
            .results
            .iter()
            .map(|result| ListItem::from_result(result, selected == Some(result.place_id.as_str())))
            .collect();

        let map_center = self
            .pin_draft
            .as_ref()
            .map_or(self.location.coordinate, |draft| draft.coordinate);

        UIViewModel {
            location_bar: LocationBar {
                label: self.location.address_label.clone(),
                mode: self.location.mode,
                pin_prompt: self.pin_editing().then(|| messages::PIN_PROMPT.to_string()),
                resolving_address: self.address_lookup_in_flight,
            },
            busy,
            notice: self.notice.clone(),
            header,
            items,
            empty_state,
            markers: derive_markers(&self.results, self.config.marker_label_chars, selected),
            map_center,
            show_center_pin: self.pin_editing(),
            detail: self.detail_panel(),
        }
    }

    fn detail_panel(&self) -> Option<DetailPanel> {
        if !self.sync.selection.detail_visible {
            return None;
        }
        let result = self.sync.selected(&self.results)?;

        let placeholder = if self.sync.menus_loading {
            Some(messages::MENUS_LOADING.to_string())
        } else if self.sync.menus.is_empty() {
            Some(messages::MENUS_EMPTY.to_string())
        } else {
            None
        };

        Some(DetailPanel {
            item: ListItem::from_result(result, true),
            phone: result.phone.clone(),
            link: result.link.clone(),
            menus: self.sync.menus.iter().map(MenuLine::from).collect(),
            loading: self.sync.menus_loading,
            placeholder,
        })
    }
}
