//! Device geolocation.

use crate::domain::error::{FinderError, Result};
use crate::domain::Coordinate;
use crate::worker::collaborators::PositionSource;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::sync::Arc;

/// Acquires the device's current coordinate.
///
/// A single attempt per call. Every failure, including a fix outside the valid
/// coordinate range, is reported as [`FinderError::LocationUnavailable`]; the
/// caller decides what to fall back to.
#[derive(Clone)]
pub struct GeoLocationProvider {
    source: Arc<dyn PositionSource>,
}

impl GeoLocationProvider {
    #[must_use]
    pub fn new(source: Arc<dyn PositionSource>) -> Self {
        Self { source }
    }

    pub fn acquire(&self) -> BoxFuture<'static, Result<Coordinate>> {
        let request = self.source.acquire_position();

        async move {
            let fix = request.await.map_err(|e| {
                tracing::debug!(error = %e, "device position request failed");
                FinderError::LocationUnavailable(e.to_string())
            })?;

            Coordinate::new(fix.latitude, fix.longitude).map_err(|e| {
                tracing::debug!(error = %e, "device reported an unusable fix");
                FinderError::LocationUnavailable(e.to_string())
            })
        }
        .boxed()
    }
}

impl std::fmt::Debug for GeoLocationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoLocationProvider").finish_non_exhaustive()
    }
}
