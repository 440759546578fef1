//! Presentation layer: view sync, user messages and view models.
//!
//! Nothing here renders. The layer turns coordinator state into display-ready
//! values for whichever map/list frontend hosts the crate.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → host renderer
//! ```
//!
//! # Modules
//!
//! - [`sync`]: Selection shared by map, list and detail panel; marker derivation
//! - [`messages`]: User-facing texts and the notice banner
//! - [`viewmodel`]: View model types representing renderable UI state

pub mod messages;
pub mod sync;
pub mod viewmodel;

pub use messages::{Notice, NoticeKind};
pub use sync::{derive_markers, Marker, SelectionState, ViewSync};
pub use viewmodel::{result_header, DetailPanel, ListItem, LocationBar, MenuLine, UIViewModel};
