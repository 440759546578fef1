//! Effect execution against external collaborators.
//!
//! This module runs the side effects requested by the event handler. It owns
//! the collaborator handles, converts transport failures into domain errors,
//! and reports every outcome back as a [`WorkerResponse`].
//!
//! # Architecture
//!
//! - `collaborators`: Trait contracts for device, geocoder and restaurant backend
//! - `messages`: Ticketed completion messages
//! - `handler`: Action executor

pub mod collaborators;
pub mod handler;
pub mod messages;

pub use collaborators::{
    ForwardGeocodeReply, GeocodeService, MenusReply, PositionError, PositionFix, PositionSource,
    RestaurantService, ReverseGeocodeReply, SearchReply, TransportError,
};
pub use handler::Worker;
pub use messages::WorkerResponse;
