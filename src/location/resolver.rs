//! Address resolution against the geocoding collaborator.
//!
//! Transport outcomes are mapped to [`FinderError`] kinds here:
//!
//! | Call    | Outcome                                   | Error                |
//! |---------|-------------------------------------------|----------------------|
//! | reverse | any collaborator error, blank address     | `GeocodeUnavailable` |
//! | forward | unreachable                               | `NetworkUnavailable` |
//! | forward | error status, missing or invalid lat/lng  | `AddressNotFound`    |

use crate::domain::error::{FinderError, Result};
use crate::domain::Coordinate;
use crate::worker::collaborators::{GeocodeService, TransportError};
use futures_util::future::{self, BoxFuture};
use futures_util::FutureExt;
use std::sync::Arc;

/// A forward-geocoded address.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAddress {
    pub coordinate: Coordinate,
    pub address_label: String,
}

/// Converts between coordinates and address labels.
#[derive(Clone)]
pub struct AddressResolver {
    service: Arc<dyn GeocodeService>,
}

impl AddressResolver {
    #[must_use]
    pub fn new(service: Arc<dyn GeocodeService>) -> Self {
        Self { service }
    }

    /// Looks up the address label for a coordinate.
    pub fn reverse_geocode(&self, coordinate: Coordinate) -> BoxFuture<'static, Result<String>> {
        let request = self.service.reverse(coordinate);

        async move {
            let reply = request.await.map_err(|e| {
                tracing::debug!(%coordinate, error = %e, "reverse geocode failed");
                FinderError::GeocodeUnavailable(e.to_string())
            })?;

            reply
                .address
                .map(|address| address.trim().to_string())
                .filter(|address| !address.is_empty())
                .ok_or_else(|| FinderError::GeocodeUnavailable(format!("no address for {coordinate}")))
        }
        .boxed()
    }

    /// Resolves free-text address input to a coordinate.
    ///
    /// A blank query fails with [`FinderError::ValidationRejected`] without
    /// calling the collaborator. When the reply carries no address, the trimmed
    /// query is used as the label.
    pub fn forward_geocode(&self, query: &str) -> BoxFuture<'static, Result<ResolvedAddress>> {
        let query = query.trim().to_string();
        if query.is_empty() {
            return future::ready(Err(FinderError::validation("address", "address is empty"))).boxed();
        }

        let request = self.service.forward(&query);

        async move {
            let reply = request.await.map_err(|e| {
                tracing::debug!(query = %query, error = %e, "forward geocode failed");
                match e {
                    TransportError::Unreachable(detail) => FinderError::NetworkUnavailable(detail),
                    TransportError::Status { .. } | TransportError::Malformed(_) => {
                        FinderError::AddressNotFound(query.clone())
                    }
                }
            })?;

            let coordinate = Coordinate::from_parts(reply.latitude, reply.longitude)
                .ok_or_else(|| FinderError::AddressNotFound(query.clone()))?;

            let address_label = reply
                .address
                .map(|address| address.trim().to_string())
                .filter(|address| !address.is_empty())
                .unwrap_or(query);

            Ok(ResolvedAddress {
                coordinate,
                address_label,
            })
        }
        .boxed()
    }
}

impl std::fmt::Debug for AddressResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddressResolver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::collaborators::{ForwardGeocodeReply, ReverseGeocodeReply};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Canned {
        reverse: Option<std::result::Result<ReverseGeocodeReply, TransportError>>,
        forward: Option<std::result::Result<ForwardGeocodeReply, TransportError>>,
        calls: AtomicUsize,
    }

    impl GeocodeService for Canned {
        fn reverse(
            &self,
            _coordinate: Coordinate,
        ) -> BoxFuture<'static, std::result::Result<ReverseGeocodeReply, TransportError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            future::ready(self.reverse.clone().unwrap()).boxed()
        }

        fn forward(&self, _query: &str) -> BoxFuture<'static, std::result::Result<ForwardGeocodeReply, TransportError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            future::ready(self.forward.clone().unwrap()).boxed()
        }
    }

    fn point() -> Coordinate {
        Coordinate::new(37.5665, 126.9780).unwrap()
    }

    #[tokio::test]
    async fn test_reverse_geocode_trims_address() {
        let resolver = AddressResolver::new(Arc::new(Canned {
            reverse: Some(Ok(ReverseGeocodeReply {
                address: Some(" 태평로1가, 중구, 서울특별시 ".into()),
            })),
            ..Canned::default()
        }));
        let label = resolver.reverse_geocode(point()).await.unwrap();
        assert_eq!(label, "태평로1가, 중구, 서울특별시");
    }

    #[tokio::test]
    async fn test_reverse_geocode_blank_address_is_unavailable() {
        let resolver = AddressResolver::new(Arc::new(Canned {
            reverse: Some(Ok(ReverseGeocodeReply {
                address: Some("   ".into()),
            })),
            ..Canned::default()
        }));
        let err = resolver.reverse_geocode(point()).await.unwrap_err();
        assert!(matches!(err, FinderError::GeocodeUnavailable(_)));
    }

    #[tokio::test]
    async fn test_reverse_geocode_transport_error_is_unavailable() {
        let resolver = AddressResolver::new(Arc::new(Canned {
            reverse: Some(Err(TransportError::Unreachable("refused".into()))),
            ..Canned::default()
        }));
        let err = resolver.reverse_geocode(point()).await.unwrap_err();
        assert!(matches!(err, FinderError::GeocodeUnavailable(_)));
    }

    #[tokio::test]
    async fn test_forward_geocode_uses_query_when_address_missing() {
        let resolver = AddressResolver::new(Arc::new(Canned {
            forward: Some(Ok(ForwardGeocodeReply {
                latitude: Some(37.3211),
                longitude: Some(127.0954),
                address: None,
            })),
            ..Canned::default()
        }));
        let resolved = resolver.forward_geocode("  수지구청  ").await.unwrap();
        assert_eq!(resolved.address_label, "수지구청");
        assert_eq!(resolved.coordinate.longitude(), 127.0954);
    }

    #[tokio::test]
    async fn test_forward_geocode_missing_coordinate_is_not_found() {
        let resolver = AddressResolver::new(Arc::new(Canned {
            forward: Some(Ok(ForwardGeocodeReply {
                latitude: Some(37.3),
                longitude: None,
                address: Some("somewhere".into()),
            })),
            ..Canned::default()
        }));
        let err = resolver.forward_geocode("somewhere").await.unwrap_err();
        assert_eq!(err, FinderError::AddressNotFound("somewhere".into()));
    }

    #[tokio::test]
    async fn test_forward_geocode_error_kinds() {
        let unreachable = AddressResolver::new(Arc::new(Canned {
            forward: Some(Err(TransportError::Unreachable("dns".into()))),
            ..Canned::default()
        }));
        assert!(matches!(
            unreachable.forward_geocode("역삼동").await.unwrap_err(),
            FinderError::NetworkUnavailable(_)
        ));

        let not_found = AddressResolver::new(Arc::new(Canned {
            forward: Some(Err(TransportError::Status {
                status: 404,
                message: "Address not found".into(),
            })),
            ..Canned::default()
        }));
        assert!(matches!(
            not_found.forward_geocode("역삼동").await.unwrap_err(),
            FinderError::AddressNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_forward_geocode_blank_query_skips_collaborator() {
        let service = Arc::new(Canned::default());
        let resolver = AddressResolver::new(service.clone());
        let err = resolver.forward_geocode("   ").await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }
}
