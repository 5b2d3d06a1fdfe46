use duration_str::deserialize_duration;
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

const DEFAULT_CONFIG_FILE: &str = include_str!("geomark.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub geocoding: Option<Geocoding>,
    pub gateway: Option<Gateway>,
    pub location: Option<Location>,
    pub map: Option<Map>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg: Self = toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration");
        cfg
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeocodingGateway {
    Opencage,
}

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gateway {
    pub opencage: Option<OpenCage>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OpenCage {
    pub api_key: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Location {
    pub track_file: Option<PathBuf>,
    #[serde(
        deserialize_with = "deserialize_duration",
        default = "default_replay_interval"
    )]
    pub replay_interval: Duration,
    #[serde(default = "default_accuracy")]
    pub accuracy: String,
    pub distance_filter: Option<f64>,
    #[serde(default = "default_permission")]
    pub permission: Permission,
}

// Same values as the embedded default file.
const fn default_replay_interval() -> Duration {
    Duration::from_secs(1)
}

fn default_accuracy() -> String {
    "best".to_string()
}

const fn default_permission() -> Permission {
    Permission::Granted
}

impl Default for Location {
    fn default() -> Self {
        Config::default().location.expect("Location configuration")
    }
}

#[derive(Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Permission {
    Granted,
    Denied,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Map {
    pub span_meters: f64,
}

impl Default for Map {
    fn default() -> Self {
        Config::default().map.expect("Map configuration")
    }
}
