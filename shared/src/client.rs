use crate::facility::Facility;
use crate::geo::{Coordinate, DistanceUnit};
use crate::nearby::{AnnotatedFacility, NearbyQuery};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    #[error("locator API returned {status}: {message}")]
    Status { status: StatusCode, message: String },
}

/// Query string accepted by `GET /v1/locations/nearby`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyParams<'a> {
    pub lat: f64,
    pub lng: f64,
    pub max_distance: f64,
    pub unit: DistanceUnit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepts: Option<&'a str>,
}

impl<'a> NearbyParams<'a> {
    pub fn new(origin: Coordinate, query: &'a NearbyQuery) -> Self {
        Self {
            lat: origin.latitude,
            lng: origin.longitude,
            max_distance: query.max_distance,
            unit: query.unit,
            limit: query.limit,
            accepts: query.accepts.as_deref(),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Runs the nearby filter remotely against a locator API.
#[derive(Debug, Clone)]
pub struct LocatorClient {
    http: reqwest::Client,
    base_url: String,
}

impl LocatorClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    #[instrument(skip(self, query), fields(base_url = %self.base_url))]
    pub async fn nearby(
        &self,
        origin: Coordinate,
        query: &NearbyQuery,
    ) -> Result<Vec<AnnotatedFacility>, ClientError> {
        let res = self
            .http
            .get(format!("{}/v1/locations/nearby", self.base_url))
            .query(&NearbyParams::new(origin, query))
            .send()
            .await?;
        Self::decode(res).await
    }

    pub async fn locations(&self) -> Result<Vec<Facility>, ClientError> {
        let res = self
            .http
            .get(format!("{}/v1/locations", self.base_url))
            .send()
            .await?;
        Self::decode(res).await
    }

    async fn decode<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, ClientError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res.json::<T>().await?);
        }

        let message = match res.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status.canonical_reason().unwrap_or_default().to_string(),
        };
        Err(ClientError::Status { status, message })
    }
}
