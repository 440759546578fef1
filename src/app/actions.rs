//! Actions representing side effects to be executed by the worker.
//!
//! The event handler returns a `Vec<Action>` after processing each event. Every
//! action that can be superseded carries the [`Ticket`] it was issued under, and
//! the worker echoes that ticket back in its [`crate::worker::WorkerResponse`].
//!
//! # Example
//!
//! ```rust
//! use foodfinder::app::{Action, OpClass, Ticket};
//!
//! let action = Action::LoadMenus {
//!     ticket: Ticket { class: OpClass::Menus, seq: 1 },
//!     place_id: "p1".to_string(),
//! };
//! assert_eq!(action.ticket().map(|t| t.seq), Some(1));
//! ```

use super::sequence::Ticket;
use crate::domain::{Coordinate, DeliveryUpdate, MenuContribution};
use crate::search::SearchRequest;

/// Work to run after a reverse geocode result has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Issue a search against the freshly labelled location.
    Search,
}

/// Commands representing side effects to be executed by the worker.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Requests the device position.
    AcquirePosition,

    /// Looks up the address label for a coordinate.
    ReverseGeocode {
        ticket: Ticket,
        coordinate: Coordinate,
        continuation: Option<Continuation>,
    },

    /// Resolves typed address text to a coordinate.
    ForwardGeocode { ticket: Ticket, query: String },

    /// Sends a restaurant search.
    Search { ticket: Ticket, request: SearchRequest },

    /// Fetches the full menu list for the detail view.
    LoadMenus { ticket: Ticket, place_id: String },

    /// Submits a user-contributed menu.
    ContributeMenu {
        place_id: String,
        contribution: MenuContribution,
    },

    /// Submits delivery fee information.
    UpdateDelivery { place_id: String, update: DeliveryUpdate },
}

impl Action {
    /// The ticket this action was issued under, if it is sequenced.
    #[must_use]
    pub const fn ticket(&self) -> Option<Ticket> {
        match self {
            Self::ReverseGeocode { ticket, .. }
            | Self::ForwardGeocode { ticket, .. }
            | Self::Search { ticket, .. }
            | Self::LoadMenus { ticket, .. } => Some(*ticket),
            Self::AcquirePosition | Self::ContributeMenu { .. } | Self::UpdateDelivery { .. } => None,
        }
    }
}
