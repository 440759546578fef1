//! Location acquisition and address resolution.
//!
//! - [`provider`]: Device geolocation with range checking
//! - [`resolver`]: Reverse and forward geocoding

pub mod provider;
pub mod resolver;

pub use provider::GeoLocationProvider;
pub use resolver::{AddressResolver, ResolvedAddress};
