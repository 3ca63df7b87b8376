//! The user's current position, and the locate-then-filter flow built on it.

use crate::facility::FacilityTable;
use crate::geo::Coordinate;
use crate::nearby::{AnnotatedFacility, NearbyQuery};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// How long a position lookup may take before it counts as a timeout.
pub const DEFAULT_POSITION_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error("geolocation is not supported")]
    Unsupported,
    #[error("permission to read the current position was denied")]
    PermissionDenied,
    #[error("timed out waiting for the current position")]
    Timeout,
    #[error("position unavailable: {0}")]
    Unavailable(String),
}

/// Source of the caller's current coordinate, typically a platform location service.
pub trait PositionProvider {
    fn current_position(&self) -> impl Future<Output = Result<Coordinate, PositionError>> + Send;
}

/// A provider that always reports the same coordinate.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinate);

impl PositionProvider for FixedPosition {
    async fn current_position(&self) -> Result<Coordinate, PositionError> {
        Ok(self.0)
    }
}

/// Wraps a provider so that slow lookups fail with [`PositionError::Timeout`].
#[derive(Debug, Clone)]
pub struct WithTimeout<P> {
    inner: P,
    timeout: Duration,
}

impl<P: PositionProvider> WithTimeout<P> {
    pub fn new(inner: P, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

impl<P: PositionProvider + Sync> PositionProvider for WithTimeout<P> {
    async fn current_position(&self) -> Result<Coordinate, PositionError> {
        tokio::time::timeout(self.timeout, self.inner.current_position())
            .await
            .map_err(|_| PositionError::Timeout)?
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found {
        origin: Coordinate,
        facilities: Vec<AnnotatedFacility>,
    },
    NoneNearby {
        origin: Coordinate,
    },
    /// No position, so no query was run.
    Unavailable(PositionError),
}

impl SearchOutcome {
    pub fn facilities(&self) -> &[AnnotatedFacility] {
        match self {
            SearchOutcome::Found { facilities, .. } => facilities,
            _ => &[],
        }
    }
}

pub async fn locate_nearby<P: PositionProvider>(
    provider: &P,
    table: &FacilityTable,
    query: &NearbyQuery,
) -> SearchOutcome {
    let origin = match provider.current_position().await {
        Ok(origin) => origin,
        Err(e) => {
            warn!(error = %e, "could not determine current position");
            return SearchOutcome::Unavailable(e);
        }
    };

    let facilities = table.nearby(origin, query);
    debug!(%origin, found = facilities.len(), max_distance = query.max_distance, unit = %query.unit, "nearby search");

    if facilities.is_empty() {
        SearchOutcome::NoneNearby { origin }
    } else {
        SearchOutcome::Found { origin, facilities }
    }
}
