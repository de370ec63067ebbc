//! Station registry endpoint

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// One registered station
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationEntry {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One region and its members in registry order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionEntry {
    pub name: String,
    pub label: String,
    /// Candidates for the hottest station
    pub members: Vec<String>,
    /// Stations counted for the rainy metric
    pub rainy_members: Vec<String>,
}

/// Registry listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationsResponse {
    pub stations: Vec<StationEntry>,
    pub regions: Vec<RegionEntry>,
}

fn names(members: &[&str]) -> Vec<String> {
    members.iter().map(|name| (*name).to_string()).collect()
}

/// List stations and region membership
pub async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let registry = state.service.registry();

    let stations = registry
        .iter()
        .map(|station| StationEntry {
            name: station.name().to_string(),
            latitude: station.location().latitude(),
            longitude: station.location().longitude(),
        })
        .collect();

    let regions = state
        .service
        .regions()
        .iter()
        .map(|region| RegionEntry {
            name: region.name.clone(),
            label: region.label.clone(),
            members: names(&region.subset.members(registry)),
            rainy_members: names(&region.rainy_subset.members(registry)),
        })
        .collect();

    Json(StationsResponse { stations, regions })
}
