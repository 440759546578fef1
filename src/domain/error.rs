//! Error types for the FoodFinder client core.
//!
//! This module defines the centralized error type [`FinderError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. Every collaborator
//! failure is converted into one of these kinds at the resolver/worker boundary, so
//! no raw transport error ever reaches application state or the view layer.

use thiserror::Error;

/// The main error type for FoodFinder operations.
///
/// Nothing in this taxonomy is fatal. Each kind degrades to a visible state: a
/// fallback value (coordinate, label) or a notice banner computed by
/// [`crate::ui::Notice::from_error`].
///
/// # Examples
///
/// ```
/// use foodfinder::FinderError;
///
/// fn parse_budget(text: &str) -> Result<u32, FinderError> {
///     text.parse().map_err(|_| FinderError::ValidationRejected {
///         field: "budget".to_string(),
///         reason: format!("'{text}' is not a whole number"),
///     })
/// }
///
/// assert!(parse_budget("abc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinderError {
    /// The device refused or lacks geolocation.
    ///
    /// Recovered locally by substituting the configured fallback coordinate and label.
    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    /// Reverse geocoding failed or returned no usable address.
    ///
    /// Recovered locally with a coordinate-formatted label.
    #[error("Geocode unavailable: {0}")]
    GeocodeUnavailable(String),

    /// Forward geocoding returned no usable coordinate pair for the query.
    #[error("Address not found: '{0}'")]
    AddressNotFound(String),

    /// The geocoding collaborator could not be reached at all.
    #[error("Network unavailable: {0}")]
    NetworkUnavailable(String),

    /// The restaurant backend could not be reached (no response received).
    #[error("Backend unreachable: {0}")]
    BackendUnreachable(String),

    /// The restaurant backend answered a search with an error response.
    #[error("Search failed: {0}")]
    SearchFailed(String),

    /// The restaurant backend answered a menu or delivery request with an error.
    #[error("Request rejected: {0}")]
    RequestRejected(String),

    /// Malformed manual input (budget text, empty address, menu price, ...).
    ///
    /// Always surfaced to the user, never silently dropped.
    #[error("Invalid {field}: {reason}")]
    ValidationRejected {
        /// Name of the rejected input field.
        field: String,
        /// Human-readable reason.
        reason: String,
    },

    /// A coordinate failed the finite/range check.
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Configuration is invalid or could not be read.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FinderError {
    /// Shorthand for a [`FinderError::ValidationRejected`].
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationRejected {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for rejected manual input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationRejected { .. })
    }
}

/// A specialized `Result` type for FoodFinder operations.
pub type Result<T> = std::result::Result<T, FinderError>;
