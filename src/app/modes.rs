//! Search phase and pin policy types.
//!
//! # State Machine
//!
//! ```text
//! Idle → ResolvingLocation → Ready → Searching → Results
//!                                        ↑  ↓  ↘
//!                                        └──┘   SearchFailed
//! ```
//!
//! `Results` and `SearchFailed` are not terminal: a new search may be issued
//! from either, and from `Searching` itself to supersede the request in flight.
//!
//! # Example
//!
//! ```rust
//! use foodfinder::app::SearchPhase;
//!
//! assert!(!SearchPhase::ResolvingLocation.can_search());
//! assert!(SearchPhase::SearchFailed.can_search());
//! ```

use serde::{Deserialize, Serialize};

/// Where the coordinator is in the location/search lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchPhase {
    /// Nothing has happened yet.
    #[default]
    Idle,

    /// Waiting for the device position (or its fallback).
    ResolvingLocation,

    /// A location is known; no search has been issued.
    Ready,

    /// A search is in flight.
    Searching,

    /// The latest search returned a result set (possibly empty).
    Results,

    /// The latest search failed.
    SearchFailed,
}

impl SearchPhase {
    /// Whether a search may be issued from this phase.
    #[must_use]
    pub const fn can_search(self) -> bool {
        matches!(
            self,
            Self::Ready | Self::Searching | Self::Results | Self::SearchFailed
        )
    }
}

/// Location mode after a pin is confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PinConfirmPolicy {
    /// Stay in manual pin mode; map movement no longer changes the location.
    #[default]
    #[serde(rename = "retain")]
    RetainPin,

    /// Return to automatic mode once the pinned point is committed.
    #[serde(rename = "auto")]
    RevertToAuto,
}

impl PinConfirmPolicy {
    /// Parses the configuration spelling (`retain` or `auto`).
    #[must_use]
    pub fn from_config(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "retain" | "pin" => Some(Self::RetainPin),
            "auto" => Some(Self::RevertToAuto),
            _ => None,
        }
    }
}
