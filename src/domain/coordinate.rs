//! Geographic coordinate value type.

use super::error::{FinderError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum valid latitude in degrees.
pub const MIN_LAT: f64 = -90.0;

/// Maximum valid latitude in degrees.
pub const MAX_LAT: f64 = 90.0;

/// Minimum valid longitude in degrees.
pub const MIN_LON: f64 = -180.0;

/// Maximum valid longitude in degrees.
pub const MAX_LON: f64 = 180.0;

/// Two coordinates closer than this (in degrees, per axis) are the same point.
///
/// Roughly one metre at mid latitudes; map widgets report re-centres with
/// float noise well below it.
const SAME_POINT_EPSILON: f64 = 1e-5;

/// A validated WGS84 point.
///
/// Both components are finite, latitude is within `[-90, 90]` and longitude
/// within `[-180, 180]`. The only way to build one is [`Coordinate::new`]
/// (deserialization goes through it as well), so a `Coordinate` held anywhere
/// in the crate is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = FinderError;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// Creates a coordinate, rejecting non-finite or out-of-range components.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::InvalidCoordinate`] when either component is NaN,
    /// infinite or outside its range.
    ///
    /// # Examples
    ///
    /// ```
    /// use foodfinder::Coordinate;
    ///
    /// let seoul = Coordinate::new(37.5665, 126.9780)?;
    /// assert_eq!(seoul.latitude(), 37.5665);
    /// assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    /// # Ok::<(), foodfinder::FinderError>(())
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(MIN_LAT..=MAX_LAT).contains(&latitude) {
            return Err(FinderError::InvalidCoordinate(format!(
                "latitude {latitude} outside [{MIN_LAT}, {MAX_LAT}]"
            )));
        }
        if !longitude.is_finite() || !(MIN_LON..=MAX_LON).contains(&longitude) {
            return Err(FinderError::InvalidCoordinate(format!(
                "longitude {longitude} outside [{MIN_LON}, {MAX_LON}]"
            )));
        }
        Ok(Self { latitude, longitude })
    }

    /// Builds a coordinate from optional components, as found in collaborator replies.
    ///
    /// Returns `None` when a component is missing or invalid.
    #[must_use]
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        Self::new(latitude?, longitude?).ok()
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns `true` when both points are within float noise of each other.
    #[must_use]
    pub fn same_point(&self, other: &Self) -> bool {
        (self.latitude - other.latitude).abs() < SAME_POINT_EPSILON
            && (self.longitude - other.longitude).abs() < SAME_POINT_EPSILON
    }
}

/// Seoul City Hall, the default fallback point.
pub const SEOUL_CITY_HALL: Coordinate = Coordinate {
    latitude: 37.5665,
    longitude: 126.9780,
};

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Formats the label shown when an address cannot be resolved for a point.
///
/// # Examples
///
/// ```
/// use foodfinder::{format_coordinate_label, Coordinate};
///
/// let c = Coordinate::new(37.5665, 126.978)?;
/// assert_eq!(format_coordinate_label(&c), "lat: 37.5665, lng: 126.9780");
/// # Ok::<(), foodfinder::FinderError>(())
/// ```
#[must_use]
pub fn format_coordinate_label(coordinate: &Coordinate) -> String {
    format!(
        "lat: {:.4}, lng: {:.4}",
        coordinate.latitude, coordinate.longitude
    )
}
