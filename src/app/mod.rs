//! Application layer coordinating state, events, and actions.
//!
//! This module is the search coordinator. It sits between the host UI and the
//! worker, owns every piece of mutable state, and decides which completions
//! are still current.
//!
//! # Architecture
//!
//! ```text
//! Host UI → Events → Event Handler → State Mutations → Actions → Worker
//!                        ↑                                         ↓
//!                        └────────── Ticketed completions ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Search phase and pin policy types
//! - [`sequence`]: Per-class sequence numbers and tickets
//! - [`session`]: Single-threaded driver owning state, worker and in-flight effects
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod sequence;
pub mod session;
pub mod state;

pub use actions::{Action, Continuation};
pub use handler::{handle_event, Event};
pub use modes::{PinConfirmPolicy, SearchPhase};
pub use sequence::{OpClass, Sequence, SequenceBook, Ticket};
pub use session::Session;
pub use state::AppState;
