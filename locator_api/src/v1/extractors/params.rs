use crate::state::SearchDefaults;
use crate::v1::error::ErrorMessage;
use axum::{
    extract::{FromRef, FromRequestParts, Query},
    http::{StatusCode, request::Parts},
};
use serde::Deserialize;
use shared::geo::{Coordinate, DistanceUnit};
use shared::nearby::NearbyQuery;

// Raw query string; coordinates stay text so empty values count as missing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNearbyParams {
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub max_distance: Option<f64>,
    pub unit: Option<DistanceUnit>,
    pub limit: Option<usize>,
    pub accepts: Option<String>,
}

/// Extractor for a validated nearby search that ensures:
/// 1) both `lat` and `lng` are present, finite and within range
/// 2) `maxDistance`, if given, is a finite non-negative number
///
/// Omitted `maxDistance` and `unit` fall back to the configured [`SearchDefaults`].
#[derive(Debug, Clone)]
pub struct NearbyRequest {
    pub origin: Coordinate,
    pub query: NearbyQuery,
}

impl<S> FromRequestParts<S> for NearbyRequest
where
    S: Send + Sync,
    SearchDefaults: FromRef<S>,
{
    type Rejection = ErrorMessage;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<RawNearbyParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ErrorMessage::from((StatusCode::BAD_REQUEST, e.to_string())))?;

        let present = |v: Option<String>| v.filter(|v| !v.trim().is_empty());
        let (Some(lat), Some(lng)) = (present(params.lat), present(params.lng)) else {
            return Err(ErrorMessage::from((
                StatusCode::BAD_REQUEST,
                "Missing latitude or longitude parameters",
            )));
        };
        let lat = parse_degrees("lat", &lat)?;
        let lng = parse_degrees("lng", &lng)?;

        let origin = Coordinate::try_new(lat, lng)
            .map_err(|e| ErrorMessage::from((StatusCode::BAD_REQUEST, e.to_string())))?;

        let defaults = SearchDefaults::from_ref(state);
        let max_distance = params.max_distance.unwrap_or(defaults.max_distance);
        if !max_distance.is_finite() || max_distance < 0.0 {
            return Err(ErrorMessage::from((
                StatusCode::BAD_REQUEST,
                "maxDistance must be a non-negative number",
            )));
        }

        Ok(Self {
            origin,
            query: NearbyQuery {
                max_distance,
                unit: params.unit.unwrap_or(defaults.unit),
                limit: params.limit,
                accepts: params.accepts.filter(|c| !c.trim().is_empty()),
            },
        })
    }
}

fn parse_degrees(name: &str, value: &str) -> Result<f64, ErrorMessage> {
    value.trim().parse::<f64>().map_err(|_| {
        ErrorMessage::from((
            StatusCode::BAD_REQUEST,
            format!("{name} must be a number, got {value:?}"),
        ))
    })
}
