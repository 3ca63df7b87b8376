mod api_models;
mod error;
mod extractors;
mod handlers;
mod router;

pub use api_models::NearbyFacilityDto;
pub use error::ErrorMessage;
pub use router::router;
