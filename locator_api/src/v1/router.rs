use crate::state::AppState;
use crate::v1::handlers::locations::{get_location, get_nearby_locations, list_locations};
use axum::Router;
use axum::routing::get;

pub fn router() -> Router<AppState> {
    Router::<AppState>::new()
        .route("/locations", get(list_locations))
        .route("/locations/nearby", get(get_nearby_locations))
        .route("/locations/{id}", get(get_location))
}
