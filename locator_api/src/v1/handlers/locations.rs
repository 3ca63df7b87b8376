use crate::v1::api_models::NearbyFacilityDto;
use crate::v1::error::ApiError;
use crate::v1::extractors::params::NearbyRequest;
use crate::v1::extractors::platform::ClientPlatform;
use axum::Json;
use axum::extract::{Path, State};
use shared::facility::{Facility, FacilityTable};
use tracing::debug;

/// Every facility in table order.
pub async fn list_locations(State(facilities): State<FacilityTable>) -> Json<Vec<Facility>> {
    Json(facilities.as_slice().to_vec())
}

pub async fn get_location(
    State(facilities): State<FacilityTable>,
    Path(id): Path<String>,
) -> Result<Json<Facility>, ApiError> {
    facilities
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(ApiError::UnknownFacility(id))
}

/// On success, returns the facilities within range of the requested point, nearest first.
/// Each entry carries platform-specific [`shared::platform::Links`] when the request has a `User-Agent`.
pub async fn get_nearby_locations(
    State(facilities): State<FacilityTable>,
    ClientPlatform(platform): ClientPlatform,
    NearbyRequest { origin, query }: NearbyRequest,
) -> Json<Vec<NearbyFacilityDto>> {
    let found = facilities.nearby(origin, &query);
    debug!(
        %origin,
        max_distance = query.max_distance,
        unit = %query.unit,
        found = found.len(),
        "nearby search"
    );

    Json(
        found
            .into_iter()
            .map(|a| NearbyFacilityDto {
                links: platform.map(|p| p.links(&a.facility)),
                facility: a,
            })
            .collect(),
    )
}
