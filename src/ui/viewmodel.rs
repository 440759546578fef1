//! View model types representing renderable UI state.
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! whatever renders the map, the list and the detail panel. They contain no
//! business logic, only display-ready strings and flags.
//!
//! # Example
//!
//! ```rust
//! use foodfinder::ui::viewmodel::result_header;
//!
//! assert_eq!(result_header(3, None), "검색 결과 3개");
//! assert_eq!(result_header(3, Some(12000)), "검색 결과 3개 · 예산 12,000원 이하");
//! ```

use super::messages::Notice;
use super::sync::Marker;
use crate::domain::{
    format_distance, format_price, group_thousands, Coordinate, LocationMode, MenuItem, MenuPreview,
    RestaurantResult,
};

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub location_bar: LocationBar,

    /// Progress text while a search is in flight.
    pub busy: Option<String>,

    pub notice: Option<Notice>,

    /// Result count header; `None` before the first search completes.
    pub header: Option<String>,

    pub items: Vec<ListItem>,

    /// Shown instead of the list when a search returned nothing.
    pub empty_state: Option<String>,

    pub markers: Vec<Marker>,

    /// Where the map should be centred (the pin draft while editing).
    pub map_center: Coordinate,

    /// Whether the fixed centre-pin overlay is drawn.
    pub show_center_pin: bool,

    pub detail: Option<DetailPanel>,
}

/// The location bar above the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationBar {
    pub label: String,
    pub mode: LocationMode,
    /// Instruction shown while pin editing is active.
    pub pin_prompt: Option<String>,
    /// Whether an address lookup is running.
    pub resolving_address: bool,
}

/// One menu line with its formatted price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLine {
    pub name: String,
    pub price: String,
    pub representative: bool,
}

impl From<&MenuPreview> for MenuLine {
    fn from(menu: &MenuPreview) -> Self {
        Self {
            name: menu.name.clone(),
            price: format_price(menu.price),
            representative: true,
        }
    }
}

impl From<&MenuItem> for MenuLine {
    fn from(menu: &MenuItem) -> Self {
        Self {
            name: menu.name.clone(),
            price: format_price(menu.price),
            representative: menu.is_representative,
        }
    }
}

/// Display information for a single result card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub place_id: String,
    pub name: String,
    pub category: String,
    pub distance: Option<String>,
    /// Rating with one decimal place.
    pub rating: Option<String>,
    pub address: String,
    pub menus: Vec<MenuLine>,
    pub is_selected: bool,
}

impl ListItem {
    #[must_use]
    pub fn from_result(result: &RestaurantResult, is_selected: bool) -> Self {
        Self {
            place_id: result.place_id.clone(),
            name: result.name.clone(),
            category: result.category.clone(),
            distance: result.distance.map(format_distance),
            rating: result.rating.map(|rating| format!("{rating:.1}")),
            address: result.display_address().to_string(),
            menus: result.representative_menus.iter().map(MenuLine::from).collect(),
            is_selected,
        }
    }
}

/// The detail panel for the selected restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPanel {
    pub item: ListItem,
    pub phone: String,
    pub link: String,
    pub menus: Vec<MenuLine>,
    pub loading: bool,
    /// Placeholder text when there is nothing to list.
    pub placeholder: Option<String>,
}

/// The result count header, with the budget ceiling when one is set.
#[must_use]
pub fn result_header(count: usize, budget: Option<u32>) -> String {
    match budget {
        Some(budget) => format!("검색 결과 {count}개 · 예산 {}원 이하", group_thousands(budget)),
        None => format!("검색 결과 {count}개"),
    }
}
