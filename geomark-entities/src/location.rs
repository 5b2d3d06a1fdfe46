use strum::{Display, EnumString};
use thiserror::Error;

use crate::{geo::*, time::Timestamp};

/// A single reported device location sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Fix {
    pub pos: Coordinate,
    /// Radius of uncertainty, if the source reports one.
    pub horizontal_accuracy: Option<Meters>,
    pub timestamp: Timestamp,
}

impl Fix {
    pub fn now(pos: Coordinate) -> Self {
        Self {
            pos,
            horizontal_accuracy: None,
            timestamp: Timestamp::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The location is currently unknown, but the service keeps trying.
    #[error("The location is currently unknown")]
    LocationUnknown,
    #[error("Access to location services has been denied")]
    Denied,
    #[error("{0}")]
    Other(String),
}

/// Everything a location service reports to its subscriber.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationEvent {
    /// One or more fixes, oldest first.
    Updated(Vec<Fix>),
    Failed(LocationError),
    AuthorizationChanged(Authorization),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Authorization {
    #[default]
    NotDetermined,
    Denied,
    AuthorizedWhenInUse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Accuracy {
    #[default]
    Best,
    NearestTenMeters,
    HundredMeters,
    Kilometer,
    ThreeKilometers,
}

impl Accuracy {
    /// Nominal accuracy in meters, `None` for the best available.
    pub const fn meters(self) -> Option<Meters> {
        match self {
            Self::Best => None,
            Self::NearestTenMeters => Some(10.0),
            Self::HundredMeters => Some(100.0),
            Self::Kilometer => Some(1_000.0),
            Self::ThreeKilometers => Some(3_000.0),
        }
    }
}

/// Minimum movement before a new fix is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DistanceFilter {
    /// Deliver every fix.
    #[default]
    None,
    Meters(Meters),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UpdateSettings {
    pub accuracy: Accuracy,
    pub distance_filter: DistanceFilter,
}
