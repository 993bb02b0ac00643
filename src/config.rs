use crate::error::{ConfigError, LoadError};
use crate::player::PlayerParams;
use crate::replay::DEFAULT_TRAIL_LENGTH;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings for loading and playing a replay.
///
/// Every field is optional in the config file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory containing the data files.
    pub data_dir: PathBuf,
    /// Name of the route file, without the `.json` extension.
    pub routes_file: String,
    /// Name of the taxi file, without the `.json` extension.
    pub taxis_file: String,
    /// Name of the passenger file, without the `.json` extension.
    pub passengers_file: String,
    /// Simulation time at which playback starts, in minutes since midnight.
    pub min_time: f64,
    /// How far simulation time advances each frame.
    pub time_step: f64,
    /// How long after the last scrub to resume playing, in ms.
    pub resume_delay_ms: u64,
    /// Length of the trail behind each taxi.
    pub trail_length: f64,
}

impl Default for Config {
    fn default() -> Self {
        let params = PlayerParams::default();
        Self {
            data_dir: PathBuf::from("data"),
            routes_file: "routes_complete_100".into(),
            taxis_file: "taxis_100".into(),
            passengers_file: "passengers".into(),
            min_time: 420.0,
            time_step: params.time_step,
            resume_delay_ms: (params.resume_delay * 1000.0).round() as u64,
            trail_length: DEFAULT_TRAIL_LENGTH,
        }
    }
}

impl Config {
    /// Parses a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that playback can move forward and reach the end.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.player_params().is_valid() {
            return Err(ConfigError::InvalidTimeStep(self.time_step));
        }
        Ok(())
    }

    /// Reads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&content).map_err(|err| match err {
            ConfigError::Json(source) => LoadError::Json {
                path: path.to_owned(),
                source,
            },
            source => LoadError::InvalidConfig {
                path: path.to_owned(),
                source,
            },
        })
    }

    /// The path of a data file with the given name.
    pub fn data_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", name))
    }

    /// The playback timing parameters.
    pub fn player_params(&self) -> PlayerParams {
        PlayerParams {
            time_step: self.time_step,
            resume_delay: self.resume_delay_ms as f64 / 1000.0,
        }
    }
}
