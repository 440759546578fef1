//! The active search location and how it was chosen.

use super::coordinate::{format_coordinate_label, Coordinate};
use serde::{Deserialize, Serialize};

/// Which mechanism currently determines the active search coordinate.
///
/// Exactly one mode is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationMode {
    /// Device geolocation (or its fallback) and, optionally, map-centre tracking.
    Auto,
    /// The user placed the centre pin on the map.
    ManualPin,
    /// The user typed an address that was forward geocoded.
    ManualAddress,
}

/// Provenance of [`LocationState::address_label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelKind {
    /// Placeholder shown while the address is being resolved.
    Pending,
    /// A real address from the geocoder (or typed by the user).
    Address,
    /// Coordinate-formatted label after a failed reverse geocode.
    CoordinateFallback,
    /// Configured label for the fallback point when the device has no location.
    DeviceFallback,
}

/// The coordinator's current location.
///
/// Mutated only through [`crate::AppState`] transitions; the view layer reads
/// a copy and requests changes through events.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationState {
    pub coordinate: Coordinate,
    pub address_label: String,
    pub label_kind: LabelKind,
    pub mode: LocationMode,
}

impl LocationState {
    /// A location whose address is still being looked up.
    #[must_use]
    pub fn pending(coordinate: Coordinate, pending_label: &str) -> Self {
        Self {
            coordinate,
            address_label: pending_label.to_string(),
            label_kind: LabelKind::Pending,
            mode: LocationMode::Auto,
        }
    }

    /// Applies a reverse-geocode outcome to the label.
    ///
    /// `None` means the lookup failed and the coordinate label is used instead.
    pub fn apply_address(&mut self, address: Option<String>) {
        match address {
            Some(label) => {
                self.address_label = label;
                self.label_kind = LabelKind::Address;
            }
            None => {
                self.address_label = format_coordinate_label(&self.coordinate);
                self.label_kind = LabelKind::CoordinateFallback;
            }
        }
    }

    /// The label to send as the backend location hint, if it is a real address.
    #[must_use]
    pub fn location_hint(&self) -> Option<&str> {
        (self.label_kind == LabelKind::Address).then_some(self.address_label.as_str())
    }
}

/// The uncommitted pin position while pin editing is active.
#[derive(Debug, Clone, PartialEq)]
pub struct PinDraft {
    pub coordinate: Coordinate,
    /// Mode to restore on cancel.
    pub previous_mode: LocationMode,
}
