use anyhow::{anyhow, Result};
use geomark_core::entities::{Accuracy, Authorization, DistanceFilter, Meters, UpdateSettings};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "geomark.toml";

const ENV_NAME_OPENCAGE_API_KEY: &str = "OPENCAGE_API_KEY";

pub struct Config {
    pub geocoding: Geocoding,
    pub location: Location,
    pub map: Map,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        cfg.geocoding
            .override_api_key(env::var(ENV_NAME_OPENCAGE_API_KEY).ok());
        Ok(cfg)
    }
}

pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
}

impl Geocoding {
    /// An explicitly given API key selects the OpenCage gateway.
    fn override_api_key(&mut self, api_key: Option<String>) {
        match api_key {
            Some(api_key) if !api_key.trim().is_empty() => {
                log::info!("Use OpenCage API key from {ENV_NAME_OPENCAGE_API_KEY}");
                self.gateway = Some(GeocodingGateway::OpenCage { api_key });
            }
            Some(_) => log::warn!("Ignoring empty {ENV_NAME_OPENCAGE_API_KEY}"),
            None => {}
        }
    }
}

#[derive(Clone)]
pub enum GeocodingGateway {
    OpenCage { api_key: String },
}

pub struct Location {
    /// CSV track that is replayed as the device location.
    pub track_file: Option<PathBuf>,
    pub replay_interval: Duration,
    pub settings: UpdateSettings,
    /// The simulated answer to the permission request.
    pub permission_answer: Authorization,
}

pub struct Map {
    /// Side length of the region around a search result.
    pub span: Meters,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            geocoding,
            gateway,
            location,
            map,
        } = from;

        let geo_gateway = match geocoding.and_then(|g| g.gateway) {
            Some(gw_name) => {
                let gateway = gateway.ok_or_else(|| anyhow!("Missing gateway configuration"))?;
                let gw = match gw_name {
                    raw::GeocodingGateway::Opencage => {
                        let raw::OpenCage { api_key } = gateway.opencage.ok_or_else(|| {
                            anyhow!("Missing 'opencage' gateway configuration")
                        })?;
                        log::info!("Use OpenCage geocoding gateway");
                        GeocodingGateway::OpenCage { api_key }
                    }
                };
                Some(gw)
            }
            None => None,
        };
        let geocoding = Geocoding {
            gateway: geo_gateway,
        };

        let raw::Location {
            track_file,
            replay_interval,
            accuracy,
            distance_filter,
            permission,
        } = location.unwrap_or_default();

        let accuracy: Accuracy = accuracy
            .parse()
            .map_err(|_| anyhow!("Invalid location accuracy '{accuracy}'"))?;
        let distance_filter = match distance_filter {
            None => DistanceFilter::None,
            Some(meters) if meters > 0.0 => DistanceFilter::Meters(meters),
            Some(meters) => return Err(anyhow!("Invalid distance filter: {meters}")),
        };
        let permission_answer = match permission {
            raw::Permission::Granted => Authorization::AuthorizedWhenInUse,
            raw::Permission::Denied => Authorization::Denied,
        };
        let location = Location {
            track_file,
            replay_interval,
            settings: UpdateSettings {
                accuracy,
                distance_filter,
            },
            permission_answer,
        };

        let raw::Map { span_meters } = map.unwrap_or_default();
        if !(span_meters > 0.0) {
            return Err(anyhow!("Invalid map span: {span_meters}"));
        }
        let map = Map { span: span_meters };

        Ok(Self {
            geocoding,
            location,
            map,
        })
    }
}
