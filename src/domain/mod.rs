//! Domain layer for the FoodFinder client core.
//!
//! This module contains the core value types shared by every other layer,
//! independent of any collaborator or rendering concern.
//!
//! # Organization
//!
//! - [`error`]: Error taxonomy and result alias
//! - [`coordinate`]: Validated geographic point
//! - [`location`]: Active location state and location modes
//! - [`restaurant`]: Search results, menus and delivery records
//!
//! # Examples
//!
//! ```
//! use foodfinder::domain::{Coordinate, LocationState, Result};
//!
//! fn start_at_city_hall() -> Result<LocationState> {
//!     let point = Coordinate::new(37.5665, 126.9780)?;
//!     Ok(LocationState::pending(point, "위치 정보를 불러오는 중..."))
//! }
//! # start_at_city_hall().unwrap();
//! ```

pub mod coordinate;
pub mod error;
pub mod location;
pub mod restaurant;

pub use coordinate::{format_coordinate_label, Coordinate, SEOUL_CITY_HALL};
pub use error::{FinderError, Result};
pub use location::{LabelKind, LocationMode, LocationState, PinDraft};
pub use restaurant::{
    format_distance, format_price, group_thousands, DeliveryUpdate, MenuContribution, MenuItem,
    MenuPreview, RestaurantResult,
};
