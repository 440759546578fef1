//! Restaurant search results and the detail-view records attached to them.
//!
//! These types mirror what the restaurant backend returns, so they derive
//! `Deserialize` with the backend's snake_case field names. Coordinates are kept
//! as the raw optional floats the backend sends; use
//! [`RestaurantResult::coordinate`] for a validated point.

use super::coordinate::Coordinate;
use serde::{Deserialize, Serialize};

/// Number of metres at which distances switch from `m` to `km`.
const METERS_PER_KILOMETER: f64 = 1000.0;

/// Label for a menu without a known price.
pub const UNKNOWN_PRICE_LABEL: &str = "가격 미정";

/// A menu shown on the result card, in backend order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuPreview {
    pub name: String,
    #[serde(default)]
    pub price: Option<u32>,
}

/// One restaurant in a search result set.
///
/// `place_id` is unique within a result set; the coordinator collapses duplicate
/// ids when a response is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantResult {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Distance from the search point in metres.
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub representative_menus: Vec<MenuPreview>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub road_address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub link: String,
}

impl RestaurantResult {
    /// Creates a result with only the required fields set.
    #[must_use]
    pub fn new(place_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            place_id: place_id.into(),
            name: name.into(),
            category: String::new(),
            latitude: None,
            longitude: None,
            distance: None,
            rating: None,
            representative_menus: Vec::new(),
            address: String::new(),
            road_address: String::new(),
            phone: String::new(),
            link: String::new(),
        }
    }

    /// Sets the raw position, as the backend would.
    #[must_use]
    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// The validated position, or `None` when missing or not renderable.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::from_parts(self.latitude, self.longitude)
    }

    /// The address to display, preferring the road address.
    #[must_use]
    pub fn display_address(&self) -> &str {
        if self.road_address.is_empty() {
            &self.address
        } else {
            &self.road_address
        }
    }
}

/// A full menu entry as returned for the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    #[serde(default)]
    pub price: Option<u32>,
    #[serde(default)]
    pub is_representative: bool,
}

/// A user-contributed menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuContribution {
    pub menu_name: String,
    pub price: Option<u32>,
}

/// User-entered delivery information for a restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryUpdate {
    pub delivery_fee: u32,
    pub minimum_order: u32,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Formats a distance in metres the way result cards show it.
///
/// # Examples
///
/// ```
/// use foodfinder::domain::format_distance;
///
/// assert_eq!(format_distance(350.0), "350m");
/// assert_eq!(format_distance(1234.0), "1.2km");
/// ```
#[must_use]
pub fn format_distance(meters: f64) -> String {
    let meters = meters.round();
    if meters >= METERS_PER_KILOMETER {
        format!("{:.1}km", meters / METERS_PER_KILOMETER)
    } else {
        format!("{meters:.0}m")
    }
}

/// Formats a price in won with thousands separators.
///
/// # Examples
///
/// ```
/// use foodfinder::domain::format_price;
///
/// assert_eq!(format_price(Some(12000)), "12,000원");
/// assert_eq!(format_price(None), "가격 미정");
/// ```
#[must_use]
pub fn format_price(price: Option<u32>) -> String {
    match price {
        Some(value) if value > 0 => format!("{}원", group_thousands(value)),
        _ => UNKNOWN_PRICE_LABEL.to_string(),
    }
}

/// Inserts `,` every three digits.
#[must_use]
pub fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
