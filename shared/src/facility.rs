use crate::FacilitiesConfig;
use crate::geo::{Coordinate, CoordinateError};
use crate::nearby::{AnnotatedFacility, NearbyQuery, search};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

const BUNDLED_FACILITIES: &str = include_str!("../data/facilities.json");

/// A fixed e-waste disposal location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, specta::Type)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub accepted_waste: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
}

impl Facility {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// `"street, city, state zip"`, as used for directions lookups.
    pub fn full_address(&self) -> String {
        format!("{}, {}, {} {}", self.address, self.city, self.state, self.zip)
    }

    /// Case-insensitive substring match against the accepted waste categories.
    pub fn accepts(&self, category: &str) -> bool {
        let needle = category.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.accepted_waste
            .iter()
            .any(|w| w.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read facility table {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse facility table: {0}")]
    Json(#[from] serde_json::Error),
    #[error("facility {0} has no accepted waste categories")]
    NoAcceptedWaste(String),
    #[error("duplicate facility id {0}")]
    DuplicateId(String),
    #[error("facility {id} has an invalid coordinate: {source}")]
    InvalidCoordinate {
        id: String,
        source: CoordinateError,
    },
}

/// Read-only facility data, built once at startup and shared by reference.
#[derive(Debug, Clone)]
pub struct FacilityTable {
    facilities: Arc<[Facility]>,
}

impl FacilityTable {
    pub fn new(facilities: Vec<Facility>) -> Result<Self, TableError> {
        let mut seen = HashSet::with_capacity(facilities.len());
        for f in &facilities {
            if !seen.insert(f.id.as_str()) {
                return Err(TableError::DuplicateId(f.id.clone()));
            }
            if f.accepted_waste.is_empty() {
                return Err(TableError::NoAcceptedWaste(f.id.clone()));
            }
            Coordinate::try_new(f.latitude, f.longitude).map_err(|source| {
                TableError::InvalidCoordinate {
                    id: f.id.clone(),
                    source,
                }
            })?;
        }

        Ok(Self {
            facilities: facilities.into(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, TableError> {
        Self::new(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, TableError> {
        let json = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The dataset compiled into the binary.
    pub fn bundled() -> Result<Self, TableError> {
        Self::from_json(BUNDLED_FACILITIES)
    }

    pub fn load(config: &FacilitiesConfig) -> Result<Self, TableError> {
        let table = match &config.path {
            Some(path) => Self::from_json_file(path)?,
            None => Self::bundled()?,
        };
        let source = config
            .path
            .as_ref()
            .map_or_else(|| "bundled".to_string(), |p| p.display().to_string());
        info!(name: "facilities.loaded", count = table.len(), source = %source, "facility table loaded");
        Ok(table)
    }

    pub fn as_slice(&self) -> &[Facility] {
        &self.facilities
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Facility> {
        self.facilities.iter().find(|f| f.id == id)
    }

    pub fn nearby(&self, origin: Coordinate, query: &NearbyQuery) -> Vec<AnnotatedFacility> {
        search(&self.facilities, origin, query)
    }
}
