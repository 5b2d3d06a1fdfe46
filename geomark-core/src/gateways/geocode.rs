use thiserror::Error;

use crate::entities::{Coordinate, GeocodeFailureKind, GeocodeResult, Placemark};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodingError {
    #[error("No geocoding service is configured")]
    NotConfigured,
    #[error("{0}")]
    Service(String),
}

pub type GeocodingResult = Result<Vec<Placemark>, GeocodingError>;

/// Reduces the answer of a geocoding service to its first candidate.
pub fn normalize(result: GeocodingResult) -> GeocodeResult {
    match result {
        Ok(candidates) => {
            if let Some(name) = candidates.first().and_then(|p| p.name.as_deref()) {
                log::debug!("First geocoding candidate: {name}");
            }
            GeocodeResult::from_candidates(&candidates)
        }
        Err(err) => GeocodeResult::Failure(GeocodeFailureKind::Service, err.to_string()),
    }
}

/// A blocking geocoding service.
pub trait GeoCodingGateway {
    /// Resolves a free-text address into candidate placemarks.
    fn forward(&self, query: &str) -> GeocodingResult;
    /// Resolves a position into candidate placemarks.
    fn reverse(&self, pos: Coordinate) -> GeocodingResult;
}

/// Issues geocoding requests without waiting for them.
///
/// Completions are delivered back to the requesting controller on the UI
/// task, in whatever order the service answers. Requests are never cancelled.
pub trait GeocodeDispatcher {
    fn dispatch_forward(&self, query: String);
    fn dispatch_reverse(&self, pos: Coordinate);
}
