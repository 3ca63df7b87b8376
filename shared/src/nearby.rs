use crate::facility::Facility;
use crate::geo::{Coordinate, DistanceUnit};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_DISTANCE: f64 = 50.0;

/// A [`Facility`] with its distance from the query point, in the query's unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, specta::Type)]
pub struct AnnotatedFacility {
    #[serde(flatten)]
    pub facility: Facility,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    pub max_distance: f64,
    pub unit: DistanceUnit,
    pub limit: Option<usize>,
    pub accepts: Option<String>,
}

impl Default for NearbyQuery {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
            unit: DistanceUnit::Miles,
            limit: None,
            accepts: None,
        }
    }
}

impl NearbyQuery {
    pub fn within(max_distance: f64, unit: DistanceUnit) -> Self {
        Self {
            max_distance,
            unit,
            ..Default::default()
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn accepting(mut self, category: impl Into<String>) -> Self {
        self.accepts = Some(category.into());
        self
    }
}

/// Facilities within `max_distance` miles of `origin`, nearest first.
pub fn nearby_locations(
    facilities: &[Facility],
    origin: Coordinate,
    max_distance: f64,
) -> Vec<AnnotatedFacility> {
    search(
        facilities,
        origin,
        &NearbyQuery::within(max_distance, DistanceUnit::Miles),
    )
}

pub fn search(
    facilities: &[Facility],
    origin: Coordinate,
    query: &NearbyQuery,
) -> Vec<AnnotatedFacility> {
    let mut found = facilities
        .iter()
        .filter(|f| query.accepts.as_deref().is_none_or(|c| f.accepts(c)))
        .map(|f| AnnotatedFacility {
            distance: origin.distance_to(&f.coordinate(), query.unit),
            facility: f.clone(),
        })
        // NaN thresholds and NaN distances both fall out here
        .filter(|a| a.distance <= query.max_distance)
        .collect::<Vec<_>>();

    found.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    if let Some(limit) = query.limit {
        found.truncate(limit);
    }
    found
}
