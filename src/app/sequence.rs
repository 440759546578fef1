//! Sequence numbers for superseding in-flight operations.
//!
//! Each class of asynchronous operation owns a monotonically increasing
//! [`Sequence`]. Dispatching an operation issues a [`Ticket`]; its completion is
//! applied only if that ticket is still the latest of its class. Nothing is
//! aborted: a superseded request runs to completion and its reply is dropped.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The operation classes that are sequenced independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpClass {
    Search,
    ReverseGeocode,
    ForwardGeocode,
    Menus,
}

/// Tag attached to a dispatched operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket {
    pub class: OpClass,
    pub seq: u64,
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}#{}", self.class, self.seq)
    }
}

/// Monotonic counter for one operation class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sequence {
    latest: u64,
}

impl Sequence {
    /// Issues the next sequence number; it becomes the latest.
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    #[must_use]
    pub const fn is_latest(&self, seq: u64) -> bool {
        seq == self.latest
    }

    /// Makes every previously issued number stale without issuing a new one.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

/// One [`Sequence`] per [`OpClass`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceBook {
    search: Sequence,
    reverse_geocode: Sequence,
    forward_geocode: Sequence,
    menus: Sequence,
}

impl SequenceBook {
    fn sequence_mut(&mut self, class: OpClass) -> &mut Sequence {
        match class {
            OpClass::Search => &mut self.search,
            OpClass::ReverseGeocode => &mut self.reverse_geocode,
            OpClass::ForwardGeocode => &mut self.forward_geocode,
            OpClass::Menus => &mut self.menus,
        }
    }

    const fn sequence(&self, class: OpClass) -> &Sequence {
        match class {
            OpClass::Search => &self.search,
            OpClass::ReverseGeocode => &self.reverse_geocode,
            OpClass::ForwardGeocode => &self.forward_geocode,
            OpClass::Menus => &self.menus,
        }
    }

    pub fn issue(&mut self, class: OpClass) -> Ticket {
        let seq = self.sequence_mut(class).issue();
        Ticket { class, seq }
    }

    #[must_use]
    pub const fn is_latest(&self, ticket: Ticket) -> bool {
        self.sequence(ticket.class).is_latest(ticket.seq)
    }

    pub fn invalidate(&mut self, class: OpClass) {
        self.sequence_mut(class).invalidate();
    }
}
