use crate::geo::*;

/// Approximate length of one degree of latitude.
pub const METERS_PER_LAT_DEGREE: Meters = 111_320.0;

/// The visible area of a map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRegion {
    pub center: Coordinate,
    pub lat_span: Meters,
    pub lng_span: Meters,
}

impl MapRegion {
    pub const fn centered(center: Coordinate, lat_span: Meters, lng_span: Meters) -> Self {
        Self {
            center,
            lat_span,
            lng_span,
        }
    }

    pub const fn square(center: Coordinate, span: Meters) -> Self {
        Self::centered(center, span, span)
    }

    pub fn lat_delta_deg(&self) -> Degrees {
        (self.lat_span / METERS_PER_LAT_DEGREE).min(Coordinate::LAT_DEG_MAX - Coordinate::LAT_DEG_MIN)
    }

    /// Longitude degrees shrink towards the poles.
    pub fn lng_delta_deg(&self) -> Degrees {
        let full_circle = Coordinate::LNG_DEG_MAX - Coordinate::LNG_DEG_MIN;
        let meters_per_degree = METERS_PER_LAT_DEGREE * self.center.lat().to_radians().cos();
        if meters_per_degree <= f64::EPSILON {
            return full_circle;
        }
        (self.lng_span / meters_per_degree).min(full_circle)
    }
}

/// A labeled point rendered on a map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub pos: Coordinate,
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_region_at_equator() {
        let region = MapRegion::square(Coordinate::from_lat_lng_deg(0.0, 0.0), 1000.0);
        let expected = 1000.0 / METERS_PER_LAT_DEGREE;
        assert!((region.lat_delta_deg() - expected).abs() < 1e-12);
        assert!((region.lng_delta_deg() - expected).abs() < 1e-12);
    }

    #[test]
    fn longitude_delta_widens_with_latitude() {
        let paris = MapRegion::square(Coordinate::from_lat_lng_deg(48.8566, 2.3522), 1000.0);
        assert!(paris.lng_delta_deg() > paris.lat_delta_deg());
        let pole = MapRegion::square(Coordinate::from_lat_lng_deg(90.0, 0.0), 1000.0);
        assert!(pole.lng_delta_deg() <= 360.0);
    }
}
