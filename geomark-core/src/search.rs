use std::rc::Rc;

use crate::{
    alert_gate::AlertGate,
    entities::*,
    error::Error,
    gateways::{
        alert::AlertPresenter,
        geocode::{self, GeocodeDispatcher, GeocodingResult},
        view::{MapView, SearchInput},
    },
};

/// Side length of the region shown around a search result.
pub const DEFAULT_REGION_SPAN: Meters = 1_000.0;

/// Forward geocodes free-text queries onto a map.
pub struct SearchController {
    geocoder: Rc<dyn GeocodeDispatcher>,
    map: Rc<dyn MapView>,
    input: Rc<dyn SearchInput>,
    alerts: Rc<dyn AlertPresenter>,
    gate: AlertGate,
    region_span: Meters,
}

impl SearchController {
    pub fn new(
        geocoder: Rc<dyn GeocodeDispatcher>,
        map: Rc<dyn MapView>,
        input: Rc<dyn SearchInput>,
        alerts: Rc<dyn AlertPresenter>,
    ) -> Self {
        Self {
            geocoder,
            map,
            input,
            alerts,
            gate: AlertGate::new(),
            region_span: DEFAULT_REGION_SPAN,
        }
    }

    pub fn with_region_span(mut self, region_span: Meters) -> Self {
        self.region_span = region_span;
        self
    }

    pub fn gate(&self) -> &AlertGate {
        &self.gate
    }

    /// Requests the forward geocoding of `query`.
    ///
    /// Blank queries are ignored.
    pub fn search(&self, query: &str) -> Result<(), Error> {
        let query = query.trim();
        if query.is_empty() {
            log::debug!("Ignoring empty search query");
            return Err(Error::EmptyInput);
        }
        log::debug!("Searching location '{query}'");
        self.geocoder.dispatch_forward(query.to_owned());
        Ok(())
    }

    /// Search triggered by the return key of the text field.
    pub fn submit(&self, query: &str) -> Result<(), Error> {
        self.input.resign_focus();
        self.search(query)
    }

    /// Shows the first candidate on the map.
    ///
    /// A returned error has already been presented to the user.
    pub fn on_forward_geocoded(
        &self,
        query: &str,
        result: GeocodingResult,
    ) -> Result<MapMarker, Error> {
        let marker = resolve_marker(result).inspect_err(|err| {
            log::warn!("Failed to resolve '{query}': {err}");
            self.gate.try_show(&*self.alerts, err.to_string());
        })?;
        let region = MapRegion::square(marker.pos, self.region_span);
        self.map.set_region(region);
        self.map.add_marker(marker.clone());
        log::info!("Found '{query}' at {}", marker.pos);
        Ok(marker)
    }
}

fn resolve_marker(result: GeocodingResult) -> Result<MapMarker, Error> {
    match geocode::normalize(result) {
        GeocodeResult::Success(pos, address) => Ok(MapMarker {
            pos,
            label: address.unwrap_or_default().joined(),
        }),
        GeocodeResult::Failure(GeocodeFailureKind::NoResult, _) => Err(Error::GeocodeNoResult),
        GeocodeResult::Failure(GeocodeFailureKind::Service, msg) => Err(Error::GeocodeFailure(msg)),
    }
}
