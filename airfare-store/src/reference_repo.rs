use airfare_core::{AirportCode, FareError, FareResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

use crate::app_config::ReferenceConfig;

/// origin code -> destination code -> value
pub type RouteTable = HashMap<String, HashMap<String, f64>>;

/// Static route facts looked up for a multi-hop quote
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteMetrics {
    pub distance: f64,
    pub duration_days: f64,
}

/// Read-only lookup data shared by every estimator call.
///
/// Loaded once at start-up; a changed dataset needs a process restart.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    distances: RouteTable,
    durations: RouteTable,
    airport_names: HashMap<String, String>,
}

impl ReferenceData {
    pub fn new(distances: RouteTable, durations: RouteTable, airport_names: HashMap<String, String>) -> Self {
        Self { distances, durations, airport_names }
    }

    pub fn load(config: &ReferenceConfig) -> FareResult<Self> {
        let distances: RouteTable = read_table(&config.distance_table)?;
        let durations: RouteTable = read_table(&config.duration_table)?;
        let airport_names: HashMap<String, String> = read_table(&config.airport_names)?;

        tracing::info!(
            "Loaded reference data: {} origins with distances, {} with durations, {} airports",
            distances.len(),
            durations.len(),
            airport_names.len()
        );

        Ok(Self::new(distances, durations, airport_names))
    }

    /// Distance and duration for a route; both tables must know the pair
    pub fn route_metrics(&self, origin: &AirportCode, destination: &AirportCode) -> FareResult<RouteMetrics> {
        let distance = lookup(&self.distances, origin, destination);
        let duration = lookup(&self.durations, origin, destination);

        match (distance, duration) {
            (Some(distance), Some(duration_days)) => Ok(RouteMetrics { distance, duration_days }),
            _ => Err(FareError::RouteNotFound {
                origin: origin.to_string(),
                destination: destination.to_string(),
            }),
        }
    }

    pub fn airport_name(&self, code: &AirportCode) -> Option<&str> {
        self.airport_names.get(code.as_str()).map(String::as_str)
    }

    /// `"Full Name (CODE)"` entries for every known airport, sorted by code
    pub fn airport_display_names(&self) -> Vec<String> {
        let mut entries: Vec<(&String, &String)> = self.airport_names.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
            .into_iter()
            .map(|(code, name)| format!("{} ({})", name, code))
            .collect()
    }
}

fn lookup(table: &RouteTable, origin: &AirportCode, destination: &AirportCode) -> Option<f64> {
    table.get(origin.as_str())?.get(destination.as_str()).copied()
}

fn read_table<T: DeserializeOwned>(path: &Path) -> FareResult<T> {
    let bytes = std::fs::read(path)
        .map_err(|e| FareError::ReferenceData(format!("{}: {}", path.display(), e)))?;
    serde_json::from_slice(&bytes).map_err(|e| FareError::ReferenceData(format!("{}: {}", path.display(), e)))
}
