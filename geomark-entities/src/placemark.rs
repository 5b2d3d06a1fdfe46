use crate::{address::*, geo::*};

/// A single geocoder candidate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Placemark {
    /// Not every candidate can be resolved to a position.
    pub pos: Option<Coordinate>,
    pub address: Address,
    /// Provider specific display name, e.g. a fully formatted address.
    pub name: Option<String>,
}

impl Placemark {
    pub fn label(&self) -> String {
        self.address.joined()
    }
}

const NO_RESULT_MESSAGE: &str = "No geocoding result";

/// Normalized outcome of a geocoding request.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeResult {
    Success(Coordinate, Option<Address>),
    Failure(GeocodeFailureKind, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeocodeFailureKind {
    /// The geocoder answered, but without a usable candidate.
    NoResult,
    /// The geocoder could not be asked or answered with an error.
    Service,
}

impl GeocodeResult {
    /// Normalizes a list of candidates by picking the first one.
    pub fn from_candidates(candidates: &[Placemark]) -> Self {
        match candidates.first() {
            Some(Placemark {
                pos: Some(pos),
                address,
                ..
            }) => Self::Success(*pos, (!address.is_empty()).then(|| address.clone())),
            _ => Self::Failure(GeocodeFailureKind::NoResult, NO_RESULT_MESSAGE.into()),
        }
    }
}
