//! Map, list and detail synchronization.
//!
//! The map markers, the result list and the detail panel all render the same
//! result set. [`ViewSync`] keeps the one piece of state they share, the
//! selection, and derives markers from the results on demand. It never holds a
//! reference into the coordinator; callers pass the current results in.

use crate::domain::{Coordinate, MenuItem, RestaurantResult};

/// Which restaurant is selected and whether its detail panel is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_place_id: Option<String>,
    pub detail_visible: bool,
}

/// A map marker for one result.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub place_id: String,
    pub coordinate: Coordinate,
    /// Name truncated to the configured number of characters.
    pub label: String,
    pub selected: bool,
}

/// Selection plus the detail panel's menu list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewSync {
    pub selection: SelectionState,
    pub menus: Vec<MenuItem>,
    pub menus_loading: bool,
}

impl ViewSync {
    /// Selects `place_id` if it is in `results`; returns whether it was found.
    pub fn marker_clicked(&mut self, results: &[RestaurantResult], place_id: &str) -> bool {
        if !contains(results, place_id) {
            tracing::debug!(place_id = %place_id, "marker click for unknown result ignored");
            return false;
        }
        self.select(place_id);
        true
    }

    /// Selects `place_id` and shows its detail panel.
    ///
    /// Returns `false` and leaves the selection unchanged when the id is not in
    /// `results`.
    pub fn open_detail(&mut self, results: &[RestaurantResult], place_id: &str) -> bool {
        if !contains(results, place_id) {
            tracing::debug!(place_id = %place_id, "detail request for unknown result ignored");
            return false;
        }
        self.select(place_id);
        self.selection.detail_visible = true;
        self.menus.clear();
        self.menus_loading = true;
        true
    }

    /// Hides the detail panel; the selection stays.
    pub fn close_detail(&mut self) {
        self.selection.detail_visible = false;
        self.menus_loading = false;
    }

    /// Drops the selection if it is not part of a freshly applied result set.
    pub fn retain_in(&mut self, results: &[RestaurantResult]) {
        let stale = self
            .selection
            .selected_place_id
            .as_deref()
            .is_some_and(|id| !contains(results, id));
        if stale {
            *self = Self::default();
        }
    }

    fn select(&mut self, place_id: &str) {
        if self.selection.selected_place_id.as_deref() != Some(place_id) {
            self.menus.clear();
        }
        self.selection.selected_place_id = Some(place_id.to_string());
    }

    #[must_use]
    pub fn selected<'a>(&self, results: &'a [RestaurantResult]) -> Option<&'a RestaurantResult> {
        let id = self.selection.selected_place_id.as_deref()?;
        results.iter().find(|r| r.place_id == id)
    }
}

fn contains(results: &[RestaurantResult], place_id: &str) -> bool {
    results.iter().any(|r| r.place_id == place_id)
}

/// Builds one marker per result with a renderable coordinate.
///
/// Results with a missing, non-finite or out-of-range position get no marker
/// but remain in the list.
///
/// # Examples
///
/// ```
/// use foodfinder::domain::RestaurantResult;
/// use foodfinder::ui::derive_markers;
///
/// let results = vec![
///     RestaurantResult::new("a", "할머니국밥").at(37.32, 127.09),
///     RestaurantResult::new("b", "좌표없음"),
/// ];
/// let markers = derive_markers(&results, 4, None);
/// assert_eq!(markers.len(), 1);
/// assert_eq!(markers[0].label, "할머니국");
/// ```
#[must_use]
pub fn derive_markers(results: &[RestaurantResult], label_chars: usize, selected: Option<&str>) -> Vec<Marker> {
    results
        .iter()
        .filter_map(|result| {
            let coordinate = result.coordinate()?;
            Some(Marker {
                place_id: result.place_id.clone(),
                coordinate,
                label: result.name.chars().take(label_chars).collect(),
                selected: selected == Some(result.place_id.as_str()),
            })
        })
        .collect()
}
