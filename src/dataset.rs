use crate::config::Config;
use crate::error::LoadError;
use crate::routes::Routes;
use serde_json::Value;
use std::path::Path;

/// The input files of a replay.
pub struct Dataset {
    /// The taxi journeys.
    pub routes: Routes,
    /// Records from the taxi file, passed through untouched.
    pub taxis: Vec<Value>,
    /// Records from the passenger file, passed through untouched.
    pub passengers: Vec<Value>,
}

impl Dataset {
    /// Loads the files named in `config`.
    ///
    /// The route file is mandatory. The taxi and passenger files are optional and
    /// load as empty lists if they cannot be read.
    pub fn load(config: &Config) -> Result<Self, LoadError> {
        let path = config.data_path(&config.routes_file);
        let routes = match load_routes(&path) {
            Ok(routes) => routes,
            Err(err) => {
                log::error!("Failed to load routes: {}", err);
                return Err(err);
            }
        };
        let passengers = load_records_or_empty(&config.data_path(&config.passengers_file));
        let taxis = load_records_or_empty(&config.data_path(&config.taxis_file));
        log::info!(
            "Loaded {} taxi routes, {} taxis and {} passengers",
            routes.len(),
            taxis.len(),
            passengers.len()
        );
        Ok(Self {
            routes,
            taxis,
            passengers,
        })
    }
}

/// Loads a route file.
pub fn load_routes(path: &Path) -> Result<Routes, LoadError> {
    let content = read(path)?;
    Routes::from_json(&content).map_err(|source| LoadError::Json {
        path: path.to_owned(),
        source,
    })
}

/// Loads a JSON array of records.
pub fn load_records(path: &Path) -> Result<Vec<Value>, LoadError> {
    let content = read(path)?;
    serde_json::from_str(&content).map_err(|source| LoadError::Json {
        path: path.to_owned(),
        source,
    })
}

/// Loads a JSON array of records, or nothing if that fails.
fn load_records_or_empty(path: &Path) -> Vec<Value> {
    load_records(path).unwrap_or_else(|err| {
        log::warn!("Using an empty list: {}", err);
        vec![]
    })
}

fn read(path: &Path) -> Result<String, LoadError> {
    log::debug!("Reading {}", path.display());
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })
}
