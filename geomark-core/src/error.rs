use thiserror::Error;

use crate::entities::LocationError;

/// Every failure the screens recover from.
///
/// The display text is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Location access has been denied. Please enable location services for this app in Settings.")]
    PermissionDenied,
    #[error("Location services are temporarily unavailable. Please try again later.")]
    LocationUnavailable,
    #[error("Failed to find user's location: {0}")]
    LocationOtherFailure(String),
    #[error("Failed to find location: {0}")]
    GeocodeFailure(String),
    #[error("Location not found.")]
    GeocodeNoResult,
    #[error("The search query is empty")]
    EmptyInput,
    #[error("No location data available to mark.")]
    NoLocationToMark,
}

impl Error {
    /// Silent errors never raise an alert.
    pub const fn is_silent(&self) -> bool {
        matches!(self, Self::EmptyInput)
    }
}

impl From<LocationError> for Error {
    fn from(from: LocationError) -> Self {
        match from {
            LocationError::LocationUnknown => Self::LocationUnavailable,
            LocationError::Denied => Self::PermissionDenied,
            LocationError::Other(msg) => Self::LocationOtherFailure(msg),
        }
    }
}
