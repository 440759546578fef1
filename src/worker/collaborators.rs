//! Contracts for the external collaborators the worker talks to.
//!
//! Every collaborator returns a boxed `'static` future so the worker can hand
//! it to the session's in-flight set without borrowing the collaborator. Errors
//! here are raw transport outcomes; they are converted into
//! [`crate::FinderError`] kinds by the location resolvers and the worker and
//! never reach application state.

use crate::domain::{Coordinate, DeliveryUpdate, MenuContribution, MenuItem, RestaurantResult};
use crate::search::SearchRequest;
use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of a failed call to a networked collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No response was received (connection refused, DNS failure, timeout).
    #[error("unreachable: {0}")]
    Unreachable(String),

    /// The collaborator answered with an error status.
    #[error("status {status}: {message}")]
    Status {
        /// Status code reported by the collaborator.
        status: u16,
        /// Error detail from the response body.
        message: String,
    },

    /// The response could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Outcome of a failed device position request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("permission denied")]
    Denied,
    #[error("geolocation unsupported")]
    Unsupported,
    #[error("position unavailable: {0}")]
    Failed(String),
}

/// A raw fix as reported by the device, not yet range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReverseGeocodeReply {
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForwardGeocodeReply {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchReply {
    #[serde(default)]
    pub results: Vec<RestaurantResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MenusReply {
    #[serde(default)]
    pub menus: Vec<MenuItem>,
}

/// The device's geolocation facility.
pub trait PositionSource: Send + Sync {
    /// Requests a single fix. One attempt; retries are the platform's business.
    fn acquire_position(&self) -> BoxFuture<'static, Result<PositionFix, PositionError>>;
}

/// The geocoding service.
pub trait GeocodeService: Send + Sync {
    fn reverse(&self, coordinate: Coordinate) -> BoxFuture<'static, Result<ReverseGeocodeReply, TransportError>>;

    fn forward(&self, query: &str) -> BoxFuture<'static, Result<ForwardGeocodeReply, TransportError>>;
}

/// The restaurant backend.
pub trait RestaurantService: Send + Sync {
    fn search(&self, request: SearchRequest) -> BoxFuture<'static, Result<SearchReply, TransportError>>;

    fn menus(&self, place_id: &str) -> BoxFuture<'static, Result<MenusReply, TransportError>>;

    fn contribute_menu(
        &self,
        place_id: &str,
        contribution: MenuContribution,
    ) -> BoxFuture<'static, Result<(), TransportError>>;

    fn update_delivery(
        &self,
        place_id: &str,
        update: DeliveryUpdate,
    ) -> BoxFuture<'static, Result<(), TransportError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_reply_parses_backend_json() {
        let json = r#"{
            "results": [
                {
                    "place_id": "p1",
                    "name": "풍덕천 국밥",
                    "category": "한식",
                    "latitude": 37.3211,
                    "longitude": 127.0954,
                    "distance": 420.0,
                    "rating": 4.3,
                    "representative_menus": [{"name": "순대국밥", "price": 9000}, {"name": "수육"}]
                },
                {"place_id": "p2", "name": "좌표 없음"}
            ]
        }"#;
        let reply: SearchReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.results.len(), 2);
        assert_eq!(reply.results[0].representative_menus[1].price, None);
        assert!(reply.results[1].coordinate().is_none());
    }

    #[test]
    fn test_forward_reply_tolerates_missing_fields() {
        let reply: ForwardGeocodeReply = serde_json::from_str(r#"{"address": "수지구청"}"#).unwrap();
        assert_eq!(reply.latitude, None);
        assert_eq!(reply.address.as_deref(), Some("수지구청"));
    }

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::Status {
            status: 404,
            message: "not found".into(),
        };
        assert_eq!(err.to_string(), "status 404: not found");
    }
}
