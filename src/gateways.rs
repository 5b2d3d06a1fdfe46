use crate::config;
use geomark_core::{entities::Coordinate, gateways::geocode::*};
use geomark_gateways::opencage::OpenCage;
use std::sync::Arc;

pub fn geocoding_gateway(cfg: Option<config::GeocodingGateway>) -> GeocodingGw {
    match cfg {
        Some(config::GeocodingGateway::OpenCage { api_key }) => {
            GeocodingGw::new(OpenCage::new(Some(api_key)))
        }
        None => {
            log::warn!("No geocoding gateway was configured");
            GeocodingGw::new(DummyGeocodingGw)
        }
    }
}

struct DummyGeocodingGw;

impl GeoCodingGateway for DummyGeocodingGw {
    fn forward(&self, query: &str) -> GeocodingResult {
        log::debug!("Cannot resolve '{query}' because no geocoding gateway was configured");
        Err(GeocodingError::NotConfigured)
    }

    fn reverse(&self, pos: Coordinate) -> GeocodingResult {
        log::debug!("Cannot resolve {pos} because no geocoding gateway was configured");
        Err(GeocodingError::NotConfigured)
    }
}

/// A geocoding gateway that can be shared with blocking worker threads.
#[derive(Clone)]
pub struct GeocodingGw(Arc<dyn GeoCodingGateway + Send + Sync + 'static>);

impl GeocodingGw {
    pub fn new<G>(gw: G) -> Self
    where
        G: GeoCodingGateway + Send + Sync + 'static,
    {
        Self(Arc::new(gw))
    }
}

impl GeoCodingGateway for GeocodingGw {
    fn forward(&self, query: &str) -> GeocodingResult {
        self.0.forward(query)
    }

    fn reverse(&self, pos: Coordinate) -> GeocodingResult {
        self.0.reverse(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_gateway_fails_every_request() {
        let gw = geocoding_gateway(None);
        assert_eq!(Err(GeocodingError::NotConfigured), gw.forward("Paris"));
        assert_eq!(
            Err(GeocodingError::NotConfigured),
            gw.reverse(Coordinate::from_lat_lng_deg(0.0, 0.0))
        );
    }
}
