//! Event handling and state transition logic.
//!
//! This module implements the coordinator's event handler. It processes user
//! input, map events and worker completions, translating them into state
//! changes and action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the host UI or as worker completions
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur on [`AppState`]
//! 4. Actions are collected and returned for the worker to execute
//!
//! Completions carry the [`crate::app::Ticket`] of the action that produced
//! them. A completion whose ticket is no longer the latest of its class is
//! dropped, whatever order the replies arrive in.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Startup`, `DismissNotice`
//! - **Input**: `QueryChanged`, `AddressQueryChanged`, `SubmitAddress`, `FilterChanged`, `Search`
//! - **Map**: `EnterPinMode`, `CancelPin`, `ConfirmPin`, `MapIdle`, `MarkerClicked`
//! - **Detail**: `OpenDetail`, `CloseDetail`, `ContributeMenu`, `SubmitDeliveryInfo`
//! - **Worker**: `Worker` with typed completion variants
//!
//! # Example
//!
//! ```rust
//! use foodfinder::app::{handle_event, Action, AppState, Event, SearchPhase};
//! use foodfinder::Config;
//!
//! let mut state = AppState::new(Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::Startup)?;
//! assert_eq!(actions, vec![Action::AcquirePosition]);
//! assert_eq!(state.phase, SearchPhase::ResolvingLocation);
//! # Ok::<(), foodfinder::FinderError>(())
//! ```

use super::actions::{Action, Continuation};
use super::modes::{PinConfirmPolicy, SearchPhase};
use super::sequence::{OpClass, Ticket};
use super::state::AppState;
use crate::domain::error::{FinderError, Result};
use crate::domain::{
    Coordinate, DeliveryUpdate, LabelKind, LocationMode, LocationState, MenuContribution, MenuItem, PinDraft,
    RestaurantResult,
};
use crate::location::ResolvedAddress;
use crate::search::FilterEdit;
use crate::ui::messages::{self, Notice};
use crate::worker::WorkerResponse;

/// Events triggered by user input, map changes, or worker completions.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The host UI mounted; starts location acquisition.
    Startup,

    /// The free-text search query changed.
    QueryChanged(String),

    /// The address entry text changed.
    AddressQueryChanged(String),

    /// The user submitted address text for forward geocoding.
    SubmitAddress(String),

    /// The user edited a filter. Does not search by itself.
    FilterChanged(FilterEdit),

    /// The user requested a search.
    Search {
        /// Coordinate to search at instead of the active location.
        override_location: Option<Coordinate>,
        /// Location hint to send instead of the active label.
        override_hint: Option<String>,
    },

    /// Starts pin editing at the current coordinate.
    EnterPinMode,

    /// Discards the pin draft and restores the previous location mode.
    CancelPin,

    /// Commits the pin draft as the active location and searches there.
    ConfirmPin,

    /// The map settled with this centre.
    MapIdle(Coordinate),

    /// A map marker was clicked.
    MarkerClicked(String),

    /// A result card was opened.
    OpenDetail(String),

    /// The detail panel was closed.
    CloseDetail,

    /// The user added a menu to the selected restaurant.
    ContributeMenu { name: String, price_text: String },

    /// The user entered delivery information for the selected restaurant.
    SubmitDeliveryInfo {
        fee_text: String,
        minimum_order_text: String,
    },

    /// Hides the notice banner.
    DismissNotice,

    /// Wraps a completion from the worker.
    Worker(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The returned flag tells the host whether the view model changed.
///
/// # Errors
///
/// Returns [`FinderError::ValidationRejected`] for rejected manual input
/// (blank address, malformed budget, menu price or delivery amounts). The
/// matching notice is recorded in `state` before the error is returned, and
/// the rest of the state is left unchanged.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event, phase = ?state.phase).entered();

    match event {
        Event::Startup => {
            if state.phase != SearchPhase::Idle {
                tracing::debug!("startup ignored outside idle phase");
                return Ok((false, vec![]));
            }
            state.phase = SearchPhase::ResolvingLocation;
            Ok((true, vec![Action::AcquirePosition]))
        }

        Event::QueryChanged(query) => {
            state.query.clone_from(query);
            Ok((false, vec![]))
        }

        Event::AddressQueryChanged(text) => {
            state.address_query.clone_from(text);
            Ok((false, vec![]))
        }

        Event::SubmitAddress(text) => {
            state.address_query.clone_from(text);
            let query = text.trim();
            if query.is_empty() {
                return reject(state, FinderError::validation("address", "address is empty"));
            }

            let ticket = state.sequences.issue(OpClass::ForwardGeocode);
            state.address_lookup_in_flight = true;
            tracing::debug!(ticket = %ticket, query = %query, "forward geocode issued");
            Ok((
                true,
                vec![Action::ForwardGeocode {
                    ticket,
                    query: query.to_string(),
                }],
            ))
        }

        Event::FilterChanged(edit) => match state.filters.apply(edit.clone()) {
            Ok(()) => Ok((true, vec![])),
            Err(e) => reject(state, e),
        },

        Event::Search {
            override_location,
            override_hint,
        } => {
            if !state.phase.can_search() {
                tracing::debug!("search ignored before a location is known");
                return Ok((false, vec![]));
            }
            let action = state.issue_search(*override_location, override_hint.as_deref());
            Ok((true, vec![action]))
        }

        Event::EnterPinMode => {
            if state.pin_editing() {
                return Ok((false, vec![]));
            }
            abandon_address_lookup(state);
            state.pin_draft = Some(PinDraft {
                coordinate: state.location.coordinate,
                previous_mode: state.location.mode,
            });
            state.location.mode = LocationMode::ManualPin;
            Ok((true, vec![]))
        }

        Event::CancelPin => {
            let Some(draft) = state.pin_draft.take() else {
                return Ok((false, vec![]));
            };
            state.location.mode = draft.previous_mode;
            Ok((true, vec![]))
        }

        Event::ConfirmPin => confirm_pin(state),

        Event::MapIdle(center) => Ok(map_idle(state, *center)),

        Event::MarkerClicked(place_id) => {
            let changed = state.sync.marker_clicked(&state.results, place_id);
            Ok((changed, vec![]))
        }

        Event::OpenDetail(place_id) => {
            if !state.sync.open_detail(&state.results, place_id) {
                return Ok((false, vec![]));
            }
            let ticket = state.sequences.issue(OpClass::Menus);
            Ok((
                true,
                vec![Action::LoadMenus {
                    ticket,
                    place_id: place_id.clone(),
                }],
            ))
        }

        Event::CloseDetail => {
            state.sync.close_detail();
            state.sequences.invalidate(OpClass::Menus);
            Ok((true, vec![]))
        }

        Event::ContributeMenu { name, price_text } => contribute_menu(state, name, price_text),

        Event::SubmitDeliveryInfo {
            fee_text,
            minimum_order_text,
        } => submit_delivery(state, fee_text, minimum_order_text),

        Event::DismissNotice => Ok((state.notice.take().is_some(), vec![])),

        Event::Worker(response) => handle_worker_response(state, response),
    }
}

/// Records the notice for a rejected input and returns the error.
fn reject(state: &mut AppState, error: FinderError) -> Result<(bool, Vec<Action>)> {
    tracing::debug!(error = %error, "input rejected");
    state.notice = Some(Notice::from_error(&error));
    Err(error)
}

/// Drops any address lookup still in flight; a later location choice wins.
fn abandon_address_lookup(state: &mut AppState) {
    if state.address_lookup_in_flight {
        tracing::debug!("address lookup superseded by pin");
    }
    state.sequences.invalidate(OpClass::ForwardGeocode);
    state.address_lookup_in_flight = false;
}

fn confirm_pin(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    let Some(draft) = state.pin_draft.take() else {
        tracing::debug!("confirm without pin draft ignored");
        return Ok((false, vec![]));
    };

    let mode = match state.config.pin_confirm {
        PinConfirmPolicy::RetainPin => LocationMode::ManualPin,
        PinConfirmPolicy::RevertToAuto => LocationMode::Auto,
    };

    let mut location = LocationState::pending(draft.coordinate, &state.config.pending_label);
    location.mode = mode;
    state.location = location;

    state.sequences.invalidate(OpClass::Search);
    abandon_address_lookup(state);
    state.user_located = true;
    state.pending_continuation = Some(Continuation::Search);
    if !state.phase.can_search() {
        state.phase = SearchPhase::Ready;
    }

    let ticket = state.sequences.issue(OpClass::ReverseGeocode);
    tracing::debug!(ticket = %ticket, coordinate = %draft.coordinate, mode = ?mode, "pin confirmed");

    Ok((
        true,
        vec![Action::ReverseGeocode {
            ticket,
            coordinate: draft.coordinate,
            continuation: Some(Continuation::Search),
        }],
    ))
}

fn map_idle(state: &mut AppState, center: Coordinate) -> (bool, Vec<Action>) {
    if let Some(draft) = state.pin_draft.as_mut() {
        draft.coordinate = center;
        return (true, vec![]);
    }

    let tracks = state.location.mode == LocationMode::Auto
        && state.config.track_map_center
        && state.phase.can_search();
    if !tracks || state.location.coordinate.same_point(&center) {
        return (false, vec![]);
    }

    state.location = LocationState::pending(center, &state.config.pending_label);
    let ticket = state.sequences.issue(OpClass::ReverseGeocode);
    let continuation = state.pending_continuation;
    tracing::debug!(ticket = %ticket, coordinate = %center, continuation = ?continuation, "tracking map centre");

    (
        true,
        vec![Action::ReverseGeocode {
            ticket,
            coordinate: center,
            continuation,
        }],
    )
}

fn selected_restaurant(state: &AppState) -> Result<&RestaurantResult> {
    state
        .sync
        .selected(&state.results)
        .ok_or_else(|| FinderError::validation("restaurant", "no restaurant selected"))
}

/// Parses a whole number of won, allowing `,` separators.
fn parse_won(field: &str, text: &str) -> Result<Option<u32>> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Ok(None);
    }
    cleaned
        .parse::<u32>()
        .map(Some)
        .map_err(|_| FinderError::validation(field, format!("'{}' is not a whole number of won", text.trim())))
}

fn menu_contribution(state: &AppState, name: &str, price_text: &str) -> Result<(String, MenuContribution)> {
    let place_id = selected_restaurant(state)?.place_id.clone();
    let menu_name = name.trim();
    if menu_name.is_empty() {
        return Err(FinderError::validation("menu_name", "menu name is empty"));
    }
    let price = match parse_won("price", price_text)? {
        Some(0) => return Err(FinderError::validation("price", "price must be positive")),
        price => price,
    };
    Ok((
        place_id,
        MenuContribution {
            menu_name: menu_name.to_string(),
            price,
        },
    ))
}

fn contribute_menu(state: &mut AppState, name: &str, price_text: &str) -> Result<(bool, Vec<Action>)> {
    match menu_contribution(state, name, price_text) {
        Ok((place_id, contribution)) => Ok((false, vec![Action::ContributeMenu { place_id, contribution }])),
        Err(e) => reject(state, e),
    }
}

fn delivery_update(state: &AppState, fee_text: &str, minimum_order_text: &str) -> Result<(String, DeliveryUpdate)> {
    let restaurant = selected_restaurant(state)?;
    let delivery_fee = parse_won("delivery_fee", fee_text)?
        .ok_or_else(|| FinderError::validation("delivery_fee", "delivery fee is required"))?;
    let minimum_order = parse_won("minimum_order", minimum_order_text)?
        .ok_or_else(|| FinderError::validation("minimum_order", "minimum order is required"))?;
    Ok((
        restaurant.place_id.clone(),
        DeliveryUpdate {
            delivery_fee,
            minimum_order,
            name: restaurant.name.clone(),
            latitude: restaurant.latitude,
            longitude: restaurant.longitude,
        },
    ))
}

fn submit_delivery(state: &mut AppState, fee_text: &str, minimum_order_text: &str) -> Result<(bool, Vec<Action>)> {
    match delivery_update(state, fee_text, minimum_order_text) {
        Ok((place_id, update)) => Ok((false, vec![Action::UpdateDelivery { place_id, update }])),
        Err(e) => reject(state, e),
    }
}

/// Returns `true` (and logs) when a completion was superseded.
fn is_stale(state: &AppState, ticket: Ticket) -> bool {
    let stale = !state.sequences.is_latest(ticket);
    if stale {
        tracing::debug!(ticket = %ticket, "superseded completion dropped");
    }
    stale
}

#[allow(clippy::too_many_lines)]
fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> Result<(bool, Vec<Action>)> {
    match response {
        WorkerResponse::PositionAcquired(result) => Ok(position_acquired(state, result)),

        WorkerResponse::ReverseGeocoded {
            ticket,
            coordinate,
            continuation,
            result,
        } => {
            if is_stale(state, *ticket) {
                return Ok((false, vec![]));
            }
            if !state.location.coordinate.same_point(coordinate) {
                tracing::debug!(%coordinate, "address for a previous coordinate dropped");
                return Ok((false, vec![]));
            }

            match result {
                Ok(label) => state.location.apply_address(Some(label.clone())),
                Err(e) => {
                    tracing::debug!(error = %e, "using coordinate label");
                    state.location.apply_address(None);
                }
            }

            let continuation = state.pending_continuation.take().or(*continuation);
            let mut actions = vec![];
            if continuation == Some(Continuation::Search) && state.phase.can_search() {
                actions.push(state.issue_search(None, None));
            }
            Ok((true, actions))
        }

        WorkerResponse::AddressGeocoded { ticket, query, result } => {
            if is_stale(state, *ticket) {
                return Ok((false, vec![]));
            }
            state.address_lookup_in_flight = false;

            match result {
                Ok(resolved) => Ok((true, address_resolved(state, resolved))),
                Err(e) => {
                    tracing::debug!(query = %query, error = %e, "address lookup failed");
                    state.notice = Some(Notice::from_error(e));
                    Ok((true, vec![]))
                }
            }
        }

        WorkerResponse::SearchCompleted { ticket, result } => {
            if is_stale(state, *ticket) {
                return Ok((false, vec![]));
            }
            match result {
                Ok(results) => {
                    state.apply_results(results.clone());
                    state.phase = SearchPhase::Results;
                    tracing::debug!(ticket = %ticket, result_count = state.results.len(), "results applied");
                }
                Err(e) => {
                    tracing::debug!(ticket = %ticket, error = %e, "search failed");
                    state.phase = SearchPhase::SearchFailed;
                    state.notice = Some(Notice::from_error(e));
                }
            }
            Ok((true, vec![]))
        }

        WorkerResponse::MenusLoaded {
            ticket,
            place_id,
            result,
        } => {
            if is_stale(state, *ticket) {
                return Ok((false, vec![]));
            }
            if state.sync.selection.selected_place_id.as_deref() != Some(place_id.as_str()) {
                return Ok((false, vec![]));
            }
            state.sync.menus_loading = false;
            state.sync.menus = match result {
                Ok(menus) => menus.clone(),
                Err(e) => {
                    tracing::debug!(place_id = %place_id, error = %e, "menus unavailable");
                    Vec::<MenuItem>::new()
                }
            };
            Ok((true, vec![]))
        }

        WorkerResponse::MenuContributed { place_id, result } => match result {
            Ok(()) => {
                let showing = state.sync.selection.detail_visible
                    && state.sync.selection.selected_place_id.as_deref() == Some(place_id.as_str());
                if !showing {
                    return Ok((false, vec![]));
                }
                state.sync.menus_loading = true;
                let ticket = state.sequences.issue(OpClass::Menus);
                Ok((
                    true,
                    vec![Action::LoadMenus {
                        ticket,
                        place_id: place_id.clone(),
                    }],
                ))
            }
            Err(e) => {
                tracing::debug!(place_id = %place_id, error = %e, "menu contribution failed");
                state.notice = Some(Notice::error(messages::MENU_CONTRIBUTE_FAILED));
                Ok((true, vec![]))
            }
        },

        WorkerResponse::DeliveryUpdated { place_id, result } => {
            state.notice = Some(match result {
                Ok(()) => Notice::info(messages::DELIVERY_SAVED),
                Err(e) => {
                    tracing::debug!(place_id = %place_id, error = %e, "delivery update failed");
                    Notice::error(messages::DELIVERY_FAILED)
                }
            });
            Ok((true, vec![]))
        }
    }
}

fn position_acquired(state: &mut AppState, result: &Result<Coordinate>) -> (bool, Vec<Action>) {
    if state.phase == SearchPhase::ResolvingLocation {
        state.phase = SearchPhase::Ready;
    }

    if state.user_located || state.location.mode != LocationMode::Auto || state.pin_editing() {
        tracing::debug!("device position arrived after a manual location was chosen");
        return (true, vec![]);
    }

    match result {
        Ok(coordinate) => {
            state.location = LocationState::pending(*coordinate, &state.config.pending_label);
            let ticket = state.sequences.issue(OpClass::ReverseGeocode);
            tracing::debug!(ticket = %ticket, %coordinate, "device position acquired");
            (
                true,
                vec![Action::ReverseGeocode {
                    ticket,
                    coordinate: *coordinate,
                    continuation: None,
                }],
            )
        }
        Err(e) => {
            tracing::debug!(error = %e, "using fallback location");
            state.location = LocationState {
                coordinate: state.config.fallback_coordinate(),
                address_label: state.config.fallback_label.clone(),
                label_kind: LabelKind::DeviceFallback,
                mode: LocationMode::Auto,
            };
            state.sequences.invalidate(OpClass::ReverseGeocode);
            state.pending_continuation = None;
            state.notice = Some(Notice::from_error(e));
            (true, vec![])
        }
    }
}

fn address_resolved(state: &mut AppState, resolved: &ResolvedAddress) -> Vec<Action> {
    state.location = LocationState {
        coordinate: resolved.coordinate,
        address_label: resolved.address_label.clone(),
        label_kind: LabelKind::Address,
        mode: LocationMode::ManualAddress,
    };
    state.pin_draft = None;
    state.user_located = true;
    state.pending_continuation = None;
    state.sequences.invalidate(OpClass::Search);
    state.sequences.invalidate(OpClass::ReverseGeocode);
    if !state.phase.can_search() {
        state.phase = SearchPhase::Ready;
    }

    tracing::debug!(
        coordinate = %resolved.coordinate,
        label = %resolved.address_label,
        "address applied"
    );

    vec![state.issue_search(Some(resolved.coordinate), Some(&resolved.address_label))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{BudgetInput, SearchRequest};
    use crate::Config;

    fn seoul() -> Coordinate {
        Coordinate::new(37.5665, 126.9780).unwrap()
    }

    fn suji() -> Coordinate {
        Coordinate::new(37.3211, 127.0954).unwrap()
    }

    fn ready_state() -> AppState {
        let mut state = AppState::new(Config::default());
        handle_event(&mut state, &Event::Startup).unwrap();
        handle_event(&mut state, &Event::Worker(WorkerResponse::PositionAcquired(Ok(seoul())))).unwrap();
        state
    }

    fn search_event() -> Event {
        Event::Search {
            override_location: None,
            override_hint: None,
        }
    }

    fn search_ticket(actions: &[Action]) -> (Ticket, SearchRequest) {
        match actions {
            [Action::Search { ticket, request }] => (*ticket, request.clone()),
            other => panic!("expected one search, got {other:?}"),
        }
    }

    fn reverse_ticket(actions: &[Action]) -> Ticket {
        match actions {
            [Action::ReverseGeocode { ticket, .. }] => *ticket,
            other => panic!("expected one reverse geocode, got {other:?}"),
        }
    }

    fn results_state() -> AppState {
        let mut state = ready_state();
        let (_, actions) = handle_event(&mut state, &search_event()).unwrap();
        let (ticket, _) = search_ticket(&actions);
        handle_event(
            &mut state,
            &Event::Worker(WorkerResponse::SearchCompleted {
                ticket,
                result: Ok(vec![
                    RestaurantResult::new("p1", "국밥").at(37.56, 126.97),
                    RestaurantResult::new("p2", "냉면").at(37.57, 126.98),
                ]),
            }),
        )
        .unwrap();
        state
    }

    #[test]
    fn test_startup_once() {
        let mut state = AppState::new(Config::default());
        let (_, actions) = handle_event(&mut state, &Event::Startup).unwrap();
        assert_eq!(actions, vec![Action::AcquirePosition]);
        let (_, actions) = handle_event(&mut state, &Event::Startup).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_search_ignored_while_resolving() {
        let mut state = AppState::new(Config::default());
        handle_event(&mut state, &Event::Startup).unwrap();
        let (_, actions) = handle_event(&mut state, &search_event()).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.phase, SearchPhase::ResolvingLocation);
    }

    #[test]
    fn test_position_acquired_requests_address() {
        let mut state = AppState::new(Config::default());
        handle_event(&mut state, &Event::Startup).unwrap();
        let (_, actions) =
            handle_event(&mut state, &Event::Worker(WorkerResponse::PositionAcquired(Ok(suji())))).unwrap();
        reverse_ticket(&actions);
        assert_eq!(state.phase, SearchPhase::Ready);
        assert_eq!(state.location.label_kind, LabelKind::Pending);
    }

    #[test]
    fn test_position_failure_uses_fallback() {
        let mut state = AppState::new(Config::default());
        handle_event(&mut state, &Event::Startup).unwrap();
        let (_, actions) = handle_event(
            &mut state,
            &Event::Worker(WorkerResponse::PositionAcquired(Err(FinderError::LocationUnavailable(
                "denied".into(),
            )))),
        )
        .unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.phase, SearchPhase::Ready);
        assert_eq!(state.location.label_kind, LabelKind::DeviceFallback);
        assert_eq!(state.location.address_label, state.config.fallback_label);
        assert_eq!(state.notice.as_ref().unwrap().message, messages::LOCATION_FALLBACK);
    }

    #[test]
    fn test_stale_reverse_geocode_dropped() {
        let mut state = ready_state();
        // The startup lookup is still in flight when the user confirms a pin.
        let startup_ticket = Ticket {
            class: OpClass::ReverseGeocode,
            seq: 1,
        };
        handle_event(&mut state, &Event::EnterPinMode).unwrap();
        handle_event(&mut state, &Event::MapIdle(suji())).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::ConfirmPin).unwrap();
        let pin_ticket = reverse_ticket(&actions);

        let (render, actions) = handle_event(
            &mut state,
            &Event::Worker(WorkerResponse::ReverseGeocoded {
                ticket: startup_ticket,
                coordinate: seoul(),
                continuation: None,
                result: Ok("태평로1가, 중구".into()),
            }),
        )
        .unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.location.label_kind, LabelKind::Pending);

        let (_, actions) = handle_event(
            &mut state,
            &Event::Worker(WorkerResponse::ReverseGeocoded {
                ticket: pin_ticket,
                coordinate: suji(),
                continuation: Some(Continuation::Search),
                result: Ok("풍덕천동, 수지구".into()),
            }),
        )
        .unwrap();
        let (_, request) = search_ticket(&actions);
        assert_eq!(state.location.address_label, "풍덕천동, 수지구");
        assert_eq!(request.query_text, "수지구 풍덕천동 음식점");
        assert_eq!(request.latitude, 37.3211);
    }

    #[test]
    fn test_reverse_geocode_failure_uses_coordinate_label() {
        let mut state = AppState::new(Config::default());
        handle_event(&mut state, &Event::Startup).unwrap();
        let (_, actions) =
            handle_event(&mut state, &Event::Worker(WorkerResponse::PositionAcquired(Ok(seoul())))).unwrap();
        let ticket = reverse_ticket(&actions);
        handle_event(
            &mut state,
            &Event::Worker(WorkerResponse::ReverseGeocoded {
                ticket,
                coordinate: seoul(),
                continuation: None,
                result: Err(FinderError::GeocodeUnavailable("timeout".into())),
            }),
        )
        .unwrap();
        assert_eq!(state.location.address_label, "lat: 37.5665, lng: 126.9780");
        assert_eq!(state.location.label_kind, LabelKind::CoordinateFallback);
    }

    #[test]
    fn test_supersede_out_of_order() {
        let mut state = ready_state();
        let (_, first) = handle_event(&mut state, &search_event()).unwrap();
        let (first, _) = search_ticket(&first);
        let (_, second) = handle_event(&mut state, &search_event()).unwrap();
        let (second, _) = search_ticket(&second);

        handle_event(
            &mut state,
            &Event::Worker(WorkerResponse::SearchCompleted {
                ticket: second,
                result: Ok(vec![RestaurantResult::new("new", "new")]),
            }),
        )
        .unwrap();
        handle_event(
            &mut state,
            &Event::Worker(WorkerResponse::SearchCompleted {
                ticket: first,
                result: Ok(vec![RestaurantResult::new("old", "old")]),
            }),
        )
        .unwrap();

        assert_eq!(state.phase, SearchPhase::Results);
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results[0].place_id, "new");
    }

    #[test]
    fn test_search_failure_then_retry() {
        let mut state = ready_state();
        let (_, actions) = handle_event(&mut state, &search_event()).unwrap();
        let (ticket, _) = search_ticket(&actions);
        handle_event(
            &mut state,
            &Event::Worker(WorkerResponse::SearchCompleted {
                ticket,
                result: Err(FinderError::BackendUnreachable("refused".into())),
            }),
        )
        .unwrap();
        assert_eq!(state.phase, SearchPhase::SearchFailed);
        assert_eq!(state.notice.as_ref().unwrap().message, messages::BACKEND_UNREACHABLE);

        let (_, actions) = handle_event(&mut state, &search_event()).unwrap();
        search_ticket(&actions);
        assert_eq!(state.phase, SearchPhase::Searching);
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_blank_address_rejected_with_notice() {
        let mut state = ready_state();
        let err = handle_event(&mut state, &Event::SubmitAddress("   ".into())).unwrap_err();
        assert!(err.is_validation());
        assert!(state.notice.is_some());
        assert!(!state.address_lookup_in_flight);
    }

    #[test]
    fn test_address_resolution_searches_there() {
        let mut state = ready_state();
        let (_, actions) = handle_event(&mut state, &Event::SubmitAddress("수지구청".into())).unwrap();
        let ticket = match actions.as_slice() {
            [Action::ForwardGeocode { ticket, query }] => {
                assert_eq!(query, "수지구청");
                *ticket
            }
            other => panic!("unexpected actions {other:?}"),
        };

        let (_, actions) = handle_event(
            &mut state,
            &Event::Worker(WorkerResponse::AddressGeocoded {
                ticket,
                query: "수지구청".into(),
                result: Ok(ResolvedAddress {
                    coordinate: suji(),
                    address_label: "풍덕천동, 수지구, 용인시".into(),
                }),
            }),
        )
        .unwrap();

        let (_, request) = search_ticket(&actions);
        assert_eq!(state.location.mode, LocationMode::ManualAddress);
        assert_eq!(request.latitude, 37.3211);
        assert_eq!(request.location_hint.as_deref(), Some("풍덕천동, 수지구, 용인시"));
        assert!(!state.address_lookup_in_flight);
    }

    #[test]
    fn test_address_not_found_notice() {
        let mut state = ready_state();
        let (_, actions) = handle_event(&mut state, &Event::SubmitAddress("어딘가".into())).unwrap();
        let ticket = actions[0].ticket().unwrap();
        handle_event(
            &mut state,
            &Event::Worker(WorkerResponse::AddressGeocoded {
                ticket,
                query: "어딘가".into(),
                result: Err(FinderError::AddressNotFound("어딘가".into())),
            }),
        )
        .unwrap();
        assert_eq!(state.notice.as_ref().unwrap().message, messages::ADDRESS_NOT_FOUND);
        assert_eq!(state.location.mode, LocationMode::Auto);
    }

    #[test]
    fn test_pin_draft_does_not_touch_location() {
        let mut state = ready_state();
        let before = state.location.clone();
        handle_event(&mut state, &Event::EnterPinMode).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::MapIdle(suji())).unwrap();

        assert!(actions.is_empty());
        assert_eq!(state.location.coordinate, before.coordinate);
        assert_eq!(state.location.address_label, before.address_label);
        assert_eq!(state.pin_draft.as_ref().unwrap().coordinate, suji());
    }

    #[test]
    fn test_cancel_pin_restores_mode() {
        let mut state = ready_state();
        handle_event(&mut state, &Event::EnterPinMode).unwrap();
        assert_eq!(state.location.mode, LocationMode::ManualPin);
        handle_event(&mut state, &Event::MapIdle(suji())).unwrap();
        handle_event(&mut state, &Event::CancelPin).unwrap();

        assert_eq!(state.location.mode, LocationMode::Auto);
        assert!(state.pin_draft.is_none());
        assert_eq!(state.location.coordinate, seoul());
    }

    #[test]
    fn test_confirm_pin_policy_revert() {
        let mut state = ready_state();
        state.config.pin_confirm = PinConfirmPolicy::RevertToAuto;
        handle_event(&mut state, &Event::EnterPinMode).unwrap();
        handle_event(&mut state, &Event::MapIdle(suji())).unwrap();
        handle_event(&mut state, &Event::ConfirmPin).unwrap();
        assert_eq!(state.location.mode, LocationMode::Auto);
        assert_eq!(state.location.coordinate, suji());
    }

    #[test]
    fn test_confirm_pin_invalidates_search() {
        let mut state = ready_state();
        let (_, actions) = handle_event(&mut state, &search_event()).unwrap();
        let (in_flight, _) = search_ticket(&actions);

        handle_event(&mut state, &Event::EnterPinMode).unwrap();
        handle_event(&mut state, &Event::ConfirmPin).unwrap();
        assert!(!state.sequences.is_latest(in_flight));
        assert_eq!(state.location.mode, LocationMode::ManualPin);
    }

    #[test]
    fn test_map_idle_tracks_only_in_auto() {
        let mut state = ready_state();
        let (_, actions) = handle_event(&mut state, &Event::MapIdle(suji())).unwrap();
        reverse_ticket(&actions);
        assert_eq!(state.location.coordinate, suji());

        // Same centre again: nothing to do.
        let (_, actions) = handle_event(&mut state, &Event::MapIdle(suji())).unwrap();
        assert!(actions.is_empty());

        state.location.mode = LocationMode::ManualAddress;
        let (_, actions) = handle_event(&mut state, &Event::MapIdle(seoul())).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.location.coordinate, suji());
    }

    fn gangnam() -> Coordinate {
        Coordinate::new(37.4979, 127.0276).unwrap()
    }

    fn reverse_reply(ticket: Ticket, coordinate: Coordinate, continuation: Option<Continuation>) -> Event {
        Event::Worker(WorkerResponse::ReverseGeocoded {
            ticket,
            coordinate,
            continuation,
            result: Ok("풍덕천동, 수지구, 용인시, 경기도".to_string()),
        })
    }

    fn revert_to_auto() -> Config {
        Config {
            pin_confirm: PinConfirmPolicy::RevertToAuto,
            ..Config::default()
        }
    }

    #[test]
    fn test_pin_confirm_wins_over_earlier_address_lookup() {
        let mut state = ready_state();
        let (_, actions) = handle_event(&mut state, &Event::SubmitAddress("강남역".to_string())).unwrap();
        let lookup = match actions.as_slice() {
            [Action::ForwardGeocode { ticket, .. }] => *ticket,
            other => panic!("expected a forward geocode, got {other:?}"),
        };

        handle_event(&mut state, &Event::EnterPinMode).unwrap();
        assert!(!state.address_lookup_in_flight);
        handle_event(&mut state, &Event::MapIdle(suji())).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::ConfirmPin).unwrap();
        let pin = reverse_ticket(&actions);

        let (render, actions) = handle_event(
            &mut state,
            &Event::Worker(WorkerResponse::AddressGeocoded {
                ticket: lookup,
                query: "강남역".to_string(),
                result: Ok(ResolvedAddress {
                    coordinate: gangnam(),
                    address_label: "역삼동, 강남구, 서울특별시".to_string(),
                }),
            }),
        )
        .unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.location.mode, LocationMode::ManualPin);
        assert_eq!(state.location.coordinate, suji());

        let (_, actions) = handle_event(&mut state, &reverse_reply(pin, suji(), Some(Continuation::Search))).unwrap();
        let (_, request) = search_ticket(&actions);
        assert_eq!(request.latitude, suji().latitude());
    }

    #[test]
    fn test_late_device_fix_does_not_move_confirmed_pin() {
        let mut state = AppState::new(revert_to_auto());
        handle_event(&mut state, &Event::Startup).unwrap();
        handle_event(&mut state, &Event::EnterPinMode).unwrap();
        handle_event(&mut state, &Event::MapIdle(suji())).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::ConfirmPin).unwrap();
        let pin = reverse_ticket(&actions);
        assert_eq!(state.location.mode, LocationMode::Auto);

        let busan = Coordinate::new(35.0, 129.0).unwrap();
        let (_, actions) =
            handle_event(&mut state, &Event::Worker(WorkerResponse::PositionAcquired(Ok(busan)))).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.location.coordinate, suji());

        let (_, actions) = handle_event(&mut state, &reverse_reply(pin, suji(), Some(Continuation::Search))).unwrap();
        let (_, request) = search_ticket(&actions);
        assert_eq!(request.latitude, suji().latitude());
        assert_eq!(request.longitude, suji().longitude());
    }

    #[test]
    fn test_tracking_lookup_carries_confirmed_search() {
        let mut state = AppState::new(revert_to_auto());
        handle_event(&mut state, &Event::Startup).unwrap();
        handle_event(&mut state, &Event::Worker(WorkerResponse::PositionAcquired(Ok(seoul())))).unwrap();
        handle_event(&mut state, &Event::EnterPinMode).unwrap();
        handle_event(&mut state, &Event::MapIdle(suji())).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::ConfirmPin).unwrap();
        let pin = reverse_ticket(&actions);

        let nearby = Coordinate::new(37.33, 127.0954).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::MapIdle(nearby)).unwrap();
        let tracking = match actions.as_slice() {
            [Action::ReverseGeocode {
                ticket, continuation, ..
            }] => {
                assert_eq!(*continuation, Some(Continuation::Search));
                *ticket
            }
            other => panic!("expected one reverse geocode, got {other:?}"),
        };

        let (_, actions) = handle_event(&mut state, &reverse_reply(pin, suji(), Some(Continuation::Search))).unwrap();
        assert!(actions.is_empty());

        let (_, actions) = handle_event(&mut state, &reverse_reply(tracking, nearby, None)).unwrap();
        let (_, request) = search_ticket(&actions);
        assert_eq!(request.latitude, nearby.latitude());
        assert_eq!(state.phase, SearchPhase::Searching);
        assert!(state.pending_continuation.is_none());
    }

    #[test]
    fn test_filter_change_does_not_search() {
        let mut state = results_state();
        let (render, actions) = handle_event(&mut state, &Event::FilterChanged(FilterEdit::Radius(2000))).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.phase, SearchPhase::Results);
    }

    #[test]
    fn test_bad_budget_surfaces_notice() {
        let mut state = results_state();
        let err = handle_event(
            &mut state,
            &Event::FilterChanged(FilterEdit::Budget(BudgetInput::Text("만원".into()))),
        )
        .unwrap_err();
        assert!(err.is_validation());
        assert!(state.notice.is_some());
        assert_eq!(state.filters.criteria().budget, None);
    }

    #[test]
    fn test_open_detail_loads_menus_and_drops_stale() {
        let mut state = results_state();
        let (_, first) = handle_event(&mut state, &Event::OpenDetail("p1".into())).unwrap();
        let first = first[0].ticket().unwrap();
        let (_, second) = handle_event(&mut state, &Event::OpenDetail("p2".into())).unwrap();
        let second = second[0].ticket().unwrap();

        let menus = vec![MenuItem {
            name: "물냉면".into(),
            price: Some(11000),
            is_representative: true,
        }];
        handle_event(
            &mut state,
            &Event::Worker(WorkerResponse::MenusLoaded {
                ticket: first,
                place_id: "p1".into(),
                result: Ok(vec![]),
            }),
        )
        .unwrap();
        assert!(state.sync.menus_loading);

        handle_event(
            &mut state,
            &Event::Worker(WorkerResponse::MenusLoaded {
                ticket: second,
                place_id: "p2".into(),
                result: Ok(menus.clone()),
            }),
        )
        .unwrap();
        assert!(!state.sync.menus_loading);
        assert_eq!(state.sync.menus, menus);

        let detail = state.compute_viewmodel().detail.unwrap();
        assert_eq!(detail.item.place_id, "p2");
        assert_eq!(detail.menus[0].price, "11,000원");
    }

    #[test]
    fn test_open_detail_unknown_id_noop() {
        let mut state = results_state();
        let (render, actions) = handle_event(&mut state, &Event::OpenDetail("zzz".into())).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.sync.selection.selected_place_id.is_none());
    }

    #[test]
    fn test_contribute_menu_validation() {
        let mut state = results_state();
        assert!(handle_event(
            &mut state,
            &Event::ContributeMenu {
                name: "물냉면".into(),
                price_text: "9000".into(),
            },
        )
        .unwrap_err()
        .is_validation());

        handle_event(&mut state, &Event::OpenDetail("p1".into())).unwrap();
        assert!(handle_event(
            &mut state,
            &Event::ContributeMenu {
                name: " ".into(),
                price_text: "9000".into(),
            },
        )
        .is_err());
        assert!(handle_event(
            &mut state,
            &Event::ContributeMenu {
                name: "수육".into(),
                price_text: "0".into(),
            },
        )
        .is_err());

        let (_, actions) = handle_event(
            &mut state,
            &Event::ContributeMenu {
                name: " 수육 ".into(),
                price_text: "25,000".into(),
            },
        )
        .unwrap();
        assert_eq!(
            actions,
            vec![Action::ContributeMenu {
                place_id: "p1".into(),
                contribution: MenuContribution {
                    menu_name: "수육".into(),
                    price: Some(25000),
                },
            }]
        );
    }

    #[test]
    fn test_menu_contribution_reloads_menus() {
        let mut state = results_state();
        handle_event(&mut state, &Event::OpenDetail("p1".into())).unwrap();
        let (_, actions) = handle_event(
            &mut state,
            &Event::Worker(WorkerResponse::MenuContributed {
                place_id: "p1".into(),
                result: Ok(()),
            }),
        )
        .unwrap();
        assert!(matches!(actions.as_slice(), [Action::LoadMenus { place_id, .. }] if place_id == "p1"));
    }

    #[test]
    fn test_submit_delivery_info() {
        let mut state = results_state();
        handle_event(&mut state, &Event::MarkerClicked("p2".into())).unwrap();

        assert!(handle_event(
            &mut state,
            &Event::SubmitDeliveryInfo {
                fee_text: "".into(),
                minimum_order_text: "15000".into(),
            },
        )
        .is_err());

        let (_, actions) = handle_event(
            &mut state,
            &Event::SubmitDeliveryInfo {
                fee_text: "0".into(),
                minimum_order_text: "15,000".into(),
            },
        )
        .unwrap();
        match actions.as_slice() {
            [Action::UpdateDelivery { place_id, update }] => {
                assert_eq!(place_id, "p2");
                assert_eq!(update.delivery_fee, 0);
                assert_eq!(update.minimum_order, 15000);
                assert_eq!(update.name, "냉면");
                assert_eq!(update.latitude, Some(37.57));
            }
            other => panic!("unexpected actions {other:?}"),
        }

        handle_event(
            &mut state,
            &Event::Worker(WorkerResponse::DeliveryUpdated {
                place_id: "p2".into(),
                result: Ok(()),
            }),
        )
        .unwrap();
        assert_eq!(state.notice.as_ref().unwrap().message, messages::DELIVERY_SAVED);
    }

    #[test]
    fn test_close_detail_keeps_selection() {
        let mut state = results_state();
        handle_event(&mut state, &Event::OpenDetail("p1".into())).unwrap();
        handle_event(&mut state, &Event::CloseDetail).unwrap();
        assert_eq!(state.sync.selection.selected_place_id.as_deref(), Some("p1"));
        assert!(state.compute_viewmodel().detail.is_none());
    }
}
