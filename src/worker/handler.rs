//! Effect executor turning [`Action`]s into collaborator calls.
//!
//! The worker holds no application state. Each action becomes one `'static`
//! future that resolves to exactly one [`WorkerResponse`]; errors are converted
//! to [`FinderError`] kinds before the response is built.

use crate::app::Action;
use crate::domain::error::FinderError;
use crate::location::{AddressResolver, GeoLocationProvider};
use crate::worker::collaborators::{GeocodeService, PositionSource, RestaurantService, TransportError};
use crate::worker::WorkerResponse;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::sync::Arc;
use tracing::Instrument;

/// Executes actions against the configured collaborators.
#[derive(Clone)]
pub struct Worker {
    provider: GeoLocationProvider,
    resolver: AddressResolver,
    restaurants: Arc<dyn RestaurantService>,
}

impl Worker {
    #[must_use]
    pub fn new(
        position: Arc<dyn PositionSource>,
        geocoder: Arc<dyn GeocodeService>,
        restaurants: Arc<dyn RestaurantService>,
    ) -> Self {
        Self {
            provider: GeoLocationProvider::new(position),
            resolver: AddressResolver::new(geocoder),
            restaurants,
        }
    }

    /// Maps a search transport failure to its error kind.
    fn search_error(error: TransportError) -> FinderError {
        match error {
            TransportError::Unreachable(detail) => FinderError::BackendUnreachable(detail),
            other => FinderError::SearchFailed(other.to_string()),
        }
    }

    /// Maps a menu or delivery transport failure to its error kind.
    fn request_error(error: TransportError) -> FinderError {
        match error {
            TransportError::Unreachable(detail) => FinderError::BackendUnreachable(detail),
            other => FinderError::RequestRejected(other.to_string()),
        }
    }

    /// Builds the future for one action.
    pub fn execute(&self, action: Action) -> BoxFuture<'static, WorkerResponse> {
        let span = tracing::debug_span!("worker_execute", ticket = ?action.ticket());

        let work = match action {
            Action::AcquirePosition => {
                let acquire = self.provider.acquire();
                async move { WorkerResponse::PositionAcquired(acquire.await) }.boxed()
            }

            Action::ReverseGeocode {
                ticket,
                coordinate,
                continuation,
            } => {
                let lookup = self.resolver.reverse_geocode(coordinate);
                async move {
                    WorkerResponse::ReverseGeocoded {
                        ticket,
                        coordinate,
                        continuation,
                        result: lookup.await,
                    }
                }
                .boxed()
            }

            Action::ForwardGeocode { ticket, query } => {
                let lookup = self.resolver.forward_geocode(&query);
                async move {
                    WorkerResponse::AddressGeocoded {
                        ticket,
                        query,
                        result: lookup.await,
                    }
                }
                .boxed()
            }

            Action::Search { ticket, request } => {
                tracing::debug!(query = %request.query_text, radius = request.radius_meters, "dispatching search");
                let search = self.restaurants.search(request);
                async move {
                    let result = search
                        .await
                        .map(|reply| reply.results)
                        .map_err(Self::search_error);
                    if let Ok(results) = &result {
                        tracing::debug!(result_count = results.len(), "search reply received");
                    }
                    WorkerResponse::SearchCompleted { ticket, result }
                }
                .boxed()
            }

            Action::LoadMenus { ticket, place_id } => {
                let menus = self.restaurants.menus(&place_id);
                async move {
                    WorkerResponse::MenusLoaded {
                        ticket,
                        place_id,
                        result: menus.await.map(|reply| reply.menus).map_err(Self::request_error),
                    }
                }
                .boxed()
            }

            Action::ContributeMenu { place_id, contribution } => {
                let submit = self.restaurants.contribute_menu(&place_id, contribution);
                async move {
                    WorkerResponse::MenuContributed {
                        place_id,
                        result: submit.await.map_err(Self::request_error),
                    }
                }
                .boxed()
            }

            Action::UpdateDelivery { place_id, update } => {
                let submit = self.restaurants.update_delivery(&place_id, update);
                async move {
                    WorkerResponse::DeliveryUpdated {
                        place_id,
                        result: submit.await.map_err(Self::request_error),
                    }
                }
                .boxed()
            }
        };

        work.instrument(span).boxed()
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("provider", &self.provider)
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}
