use axum::extract::FromRef;
use shared::SearchConfig;
use shared::facility::FacilityTable;
use shared::geo::DistanceUnit;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub facilities: FacilityTable,
    pub search: SearchDefaults,
}

/// Values used when a nearby request leaves `maxDistance` or `unit` out.
#[derive(Clone, Debug)]
pub struct SearchDefaults {
    pub max_distance: f64,
    pub unit: DistanceUnit,
}

impl AppState {
    pub fn new(facilities: FacilityTable, search: &SearchConfig) -> Self {
        Self {
            facilities,
            search: SearchDefaults {
                max_distance: search.default_max_distance,
                unit: search.default_unit,
            },
        }
    }
}
