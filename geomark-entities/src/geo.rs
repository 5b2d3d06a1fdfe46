use std::fmt;

pub type Degrees = f64;
pub type Meters = f64;

/// Mean earth radius used for distance calculations.
pub const EARTH_RADIUS: Meters = 6_371_000.0;

/// A WGS 84 position as reported by a location fix or a geocoder.
///
/// Values are kept as reported, without any fixed-point conversion,
/// so rendering preserves the full precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    lat: Degrees,
    lng: Degrees,
}

impl Coordinate {
    pub const LAT_DEG_MAX: Degrees = 90.0;
    pub const LAT_DEG_MIN: Degrees = -90.0;
    pub const LNG_DEG_MAX: Degrees = 180.0;
    pub const LNG_DEG_MIN: Degrees = -180.0;

    pub const fn from_lat_lng_deg(lat: Degrees, lng: Degrees) -> Self {
        Self { lat, lng }
    }

    pub fn try_from_lat_lng_deg(lat: Degrees, lng: Degrees) -> Option<Self> {
        let pos = Self::from_lat_lng_deg(lat, lng);
        pos.is_valid().then_some(pos)
    }

    pub const fn lat(self) -> Degrees {
        self.lat
    }

    pub const fn lng(self) -> Degrees {
        self.lng
    }

    pub fn is_valid(self) -> bool {
        (Self::LAT_DEG_MIN..=Self::LAT_DEG_MAX).contains(&self.lat)
            && (Self::LNG_DEG_MIN..=Self::LNG_DEG_MAX).contains(&self.lng)
    }

    /// Great-circle distance (haversine formula).
    pub fn distance_to(self, other: Self) -> Meters {
        let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
        let d_lat = lat2 - lat1;
        let d_lng = (other.lng - self.lng).to_radians();
        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS * a.sqrt().asin()
    }
}

/// Renders `"Lat: {lat}, Lon: {lng}"`.
///
/// Degrees use the shortest round-trip form and keep a fractional part,
/// e.g. `47.0`.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lat: {:?}, Lon: {:?}", self.lat, self.lng)
    }
}
