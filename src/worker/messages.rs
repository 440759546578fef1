//! Completion messages sent from the worker back to the coordinator.
//!
//! Each response echoes the [`Ticket`] of the action that produced it, so the
//! handler can drop superseded completions. Outcomes are already converted to
//! [`crate::FinderError`]; no transport error appears here.

use crate::app::actions::Continuation;
use crate::app::sequence::Ticket;
use crate::domain::error::Result;
use crate::domain::{Coordinate, MenuItem, RestaurantResult};
use crate::location::ResolvedAddress;

/// Messages sent from the worker to the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerResponse {
    /// The device position request finished.
    PositionAcquired(Result<Coordinate>),

    /// A reverse geocode finished.
    ReverseGeocoded {
        ticket: Ticket,
        /// The coordinate that was looked up.
        coordinate: Coordinate,
        continuation: Option<Continuation>,
        result: Result<String>,
    },

    /// A forward geocode of typed address text finished.
    AddressGeocoded {
        ticket: Ticket,
        query: String,
        result: Result<ResolvedAddress>,
    },

    /// A restaurant search finished.
    SearchCompleted {
        ticket: Ticket,
        result: Result<Vec<RestaurantResult>>,
    },

    /// A menu list for the detail view arrived.
    MenusLoaded {
        ticket: Ticket,
        place_id: String,
        result: Result<Vec<MenuItem>>,
    },

    /// A menu contribution was acknowledged or rejected.
    MenuContributed { place_id: String, result: Result<()> },

    /// A delivery information update was acknowledged or rejected.
    DeliveryUpdated { place_id: String, result: Result<()> },
}

impl WorkerResponse {
    /// The ticket the originating action carried, if it was sequenced.
    #[must_use]
    pub const fn ticket(&self) -> Option<Ticket> {
        match self {
            Self::ReverseGeocoded { ticket, .. }
            | Self::AddressGeocoded { ticket, .. }
            | Self::SearchCompleted { ticket, .. }
            | Self::MenusLoaded { ticket, .. } => Some(*ticket),
            Self::PositionAcquired(_) | Self::MenuContributed { .. } | Self::DeliveryUpdated { .. } => None,
        }
    }
}
