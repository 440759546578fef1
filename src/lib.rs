//! FoodFinder: location-aware restaurant search coordination.
//!
//! The crate is the client core of a restaurant finder. It provides:
//! - Device geolocation with a configured fallback point
//! - Reverse and forward geocoding of the active location
//! - Search refinement filters (radius, categories, budget)
//! - Regional query augmentation from address labels
//! - A search coordinator whose latest request always wins
//! - Selection sync between map markers, result list and detail panel

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host UI (map widget, list, detail panel)           │  ← Events in, view models out
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, ticketed supersession            │
//! │  - Session driver                                   │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Search Layer  │   │ Worker Layer  │
//! │ (ui/)         │   │ (search/)     │   │ (worker/)     │
//! │ - View sync   │   │ - Filters     │   │ - Effects     │
//! │ - Messages    │   │ - Region      │   │ - Contracts   │
//! │ - View models │   │ - Requests    │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                                                 │
//! ┌─────────────────────────────────────────────────────┐
//! │  Location (location/) & Domain (domain/)            │
//! │  - Geolocation, geocoding                           │
//! │  - Coordinates, results, error types                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Search coordinator with event/action model
//! - [`domain`]: Core value types and errors
//! - [`location`]: Geolocation provider and address resolver
//! - [`search`]: Filters, regional phrases and request derivation
//! - [`worker`]: Collaborator contracts and effect execution
//! - [`ui`]: View sync, user messages and view models
//! - [`observability`]: Logging setup
//!
//! # Configuration
//!
//! Configuration comes either as a string map from the host or as TOML:
//!
//! ```toml
//! default_radius = 1500
//! pin_confirm = "auto"
//! track_map_center = false
//!
//! [region]
//! delimiters = [",", " "]
//! ```
//!
//! # Examples
//!
//! ```rust
//! use foodfinder::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::Startup)?;
//! // Hand the actions to a Worker, e.g. through a Session.
//! # assert_eq!(actions.len(), 1);
//! # Ok::<(), foodfinder::FinderError>(())
//! ```

pub mod app;
pub mod domain;
pub mod location;
pub mod search;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, PinConfirmPolicy, SearchPhase, Session};
pub use domain::{format_coordinate_label, Coordinate, FinderError, Result};
pub use ui::UIViewModel;

use domain::SEOUL_CITY_HALL;
use search::filter::DEFAULT_RADIUS_METERS;
use search::RegionVocabulary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::path::Path;

/// Coordinator configuration.
///
/// # Example
///
/// ```toml
/// fallback_latitude = 37.5665
/// fallback_longitude = 126.9780
/// fallback_label = "서울특별시청"
/// default_query = "음식점"
/// default_radius = 1000
/// min_radius = 100
/// max_radius = 5000
/// pin_confirm = "retain"
/// track_map_center = true
/// marker_label_chars = 4
/// log_level = "debug"
///
/// [region]
/// delimiters = [","]
/// neighborhood_suffixes = ["동", "읍", "면", "리", "가"]
/// district_suffixes = ["구", "군"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Point used when the device has no position. Default: Seoul City Hall.
    pub fallback_latitude: f64,
    pub fallback_longitude: f64,

    /// Label shown for the fallback point.
    pub fallback_label: String,

    /// Label shown while an address lookup is pending.
    pub pending_label: String,

    /// Query term used when the search text is blank. Default: `"음식점"`
    pub default_query: String,

    /// Search radius in metres. Default: 1000
    pub default_radius: u32,
    pub min_radius: u32,
    pub max_radius: u32,

    /// Mode after a pin is confirmed: `retain` (default) or `auto`.
    pub pin_confirm: PinConfirmPolicy,

    /// Whether the location follows the map centre in automatic mode.
    pub track_map_center: bool,

    /// Characters of the restaurant name shown on a marker. Default: 4
    pub marker_label_chars: usize,

    /// Log level filter when `RUST_LOG` is unset.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub log_level: Option<String>,

    /// Locality suffix vocabulary for regional phrases.
    pub region: RegionVocabulary,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fallback_latitude: SEOUL_CITY_HALL.latitude(),
            fallback_longitude: SEOUL_CITY_HALL.longitude(),
            fallback_label: "서울특별시청".to_string(),
            pending_label: ui::messages::LOCATION_PENDING.to_string(),
            default_query: "음식점".to_string(),
            default_radius: DEFAULT_RADIUS_METERS,
            min_radius: 100,
            max_radius: 5000,
            pin_confirm: PinConfirmPolicy::RetainPin,
            track_map_center: true,
            marker_label_chars: 4,
            log_level: None,
            region: RegionVocabulary::default(),
        }
    }
}

fn parsed<T: std::str::FromStr>(config: &BTreeMap<String, String>, key: &str, default: T) -> T {
    match config.get(key).map(|v| v.trim().parse::<T>()) {
        Some(Ok(value)) => value,
        Some(Err(_)) => {
            tracing::debug!(key = key, "unparseable config value, using default");
            default
        }
        None => default,
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl Config {
    /// Parses configuration from the host's string map.
    ///
    /// Values that are missing or fail to parse keep their defaults.
    ///
    /// # Parsing Rules
    ///
    /// - numeric keys: parsed as numbers
    /// - `track_map_center`: `true`/`false`
    /// - `pin_confirm`: `retain` or `auto`
    /// - `region_delimiters`: every character of the value is a delimiter
    /// - `neighborhood_suffixes`, `district_suffixes`: comma-separated lists
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use foodfinder::{Config, PinConfirmPolicy};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("default_radius".to_string(), "1500".to_string());
    /// map.insert("pin_confirm".to_string(), "auto".to_string());
    /// map.insert("district_suffixes".to_string(), "구,군,시".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.default_radius, 1500);
    /// assert_eq!(config.pin_confirm, PinConfirmPolicy::RevertToAuto);
    /// assert_eq!(config.region.district_suffixes, vec!["구", "군", "시"]);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let text = |key: &str, default: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map_or_else(|| default.to_string(), String::from)
        };

        let mut region = defaults.region.clone();
        if let Some(delimiters) = config.get("region_delimiters").filter(|v| !v.is_empty()) {
            region.delimiters = delimiters.chars().collect();
        }
        if let Some(suffixes) = config.get("neighborhood_suffixes").map(|v| parse_list(v)) {
            if !suffixes.is_empty() {
                region.neighborhood_suffixes = suffixes;
            }
        }
        if let Some(suffixes) = config.get("district_suffixes").map(|v| parse_list(v)) {
            if !suffixes.is_empty() {
                region.district_suffixes = suffixes;
            }
        }

        Self {
            fallback_latitude: parsed(config, "fallback_latitude", defaults.fallback_latitude),
            fallback_longitude: parsed(config, "fallback_longitude", defaults.fallback_longitude),
            fallback_label: text("fallback_label", &defaults.fallback_label),
            pending_label: text("pending_label", &defaults.pending_label),
            default_query: text("default_query", &defaults.default_query),
            default_radius: parsed(config, "default_radius", defaults.default_radius),
            min_radius: parsed(config, "min_radius", defaults.min_radius),
            max_radius: parsed(config, "max_radius", defaults.max_radius),
            pin_confirm: config
                .get("pin_confirm")
                .and_then(|v| PinConfirmPolicy::from_config(v))
                .unwrap_or(defaults.pin_confirm),
            track_map_center: parsed(config, "track_map_center", defaults.track_map_center),
            marker_label_chars: parsed(config, "marker_label_chars", defaults.marker_label_chars),
            log_level: config.get("log_level").cloned(),
            region,
        }
    }

    /// Parses and validates TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Config`] for malformed TOML or inconsistent values
    /// (radius bounds, fallback coordinate).
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| FinderError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Config`] when the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| FinderError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Checks that the values are mutually consistent.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Config`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        Coordinate::new(self.fallback_latitude, self.fallback_longitude)
            .map_err(|e| FinderError::Config(format!("fallback point: {e}")))?;
        if self.min_radius > self.max_radius {
            return Err(FinderError::Config(format!(
                "min_radius {} exceeds max_radius {}",
                self.min_radius, self.max_radius
            )));
        }
        if !self.radius_bounds().contains(&self.default_radius) {
            return Err(FinderError::Config(format!(
                "default_radius {} outside {}..={}",
                self.default_radius, self.min_radius, self.max_radius
            )));
        }
        Ok(())
    }

    /// The fallback point, or Seoul City Hall if the configured one is invalid.
    #[must_use]
    pub fn fallback_coordinate(&self) -> Coordinate {
        Coordinate::new(self.fallback_latitude, self.fallback_longitude).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "invalid fallback point, using Seoul City Hall");
            SEOUL_CITY_HALL
        })
    }

    /// Accepted radius range.
    #[must_use]
    pub fn radius_bounds(&self) -> RangeInclusive<u32> {
        if self.min_radius <= self.max_radius {
            self.min_radius..=self.max_radius
        } else {
            self.max_radius..=self.min_radius
        }
    }
}

/// Creates the coordinator state for a configuration.
///
/// # Example
///
/// ```rust
/// use foodfinder::{initialize, Config, SearchPhase};
///
/// let state = initialize(&Config::default());
/// assert_eq!(state.phase, SearchPhase::Idle);
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        default_radius = config.default_radius,
        pin_confirm = ?config.pin_confirm,
        "initializing search coordinator"
    );
    AppState::new(config.clone())
}
