use std::rc::Rc;

use crate::{
    alert_gate::AlertGate,
    entities::*,
    error::Error,
    gateways::{alert::AlertPresenter, geocode::GeocodingResult, view::LocationView},
};

/// Turns location fixes, reverse geocoding results and location errors
/// into label texts and alerts of the tracking screen.
pub struct LocationPresenter {
    view: Rc<dyn LocationView>,
    alerts: Rc<dyn AlertPresenter>,
    gate: AlertGate,
}

impl LocationPresenter {
    pub fn new(view: Rc<dyn LocationView>, alerts: Rc<dyn AlertPresenter>, gate: AlertGate) -> Self {
        Self { view, alerts, gate }
    }

    pub fn gate(&self) -> &AlertGate {
        &self.gate
    }

    pub fn coordinates_text(&self) -> String {
        self.view.coordinates_text()
    }

    /// Renders the coordinates of the fix right away.
    ///
    /// Returns the position that should be reverse geocoded.
    pub fn present_fix(&self, fix: &Fix) -> Coordinate {
        log::debug!("Location fix at {}: {}", fix.timestamp, fix.pos);
        self.view.set_coordinates_text(&fix.pos.to_string());
        fix.pos
    }

    /// Applies a reverse geocoding completion to the address label.
    ///
    /// Completions overwrite each other in the order they arrive.
    pub fn present_address(&self, result: GeocodingResult) {
        match result {
            Ok(candidates) => match candidates.first() {
                Some(placemark) => self.view.set_address_text(&placemark.label()),
                None => log::debug!("Reverse geocoding returned no candidates"),
            },
            Err(err) => {
                log::warn!("Reverse geocoding failed: {err}");
                self.view.set_address_text(&format!("Error: {err}"));
            }
        }
    }

    pub fn present_location_error(&self, err: LocationError) -> bool {
        log::warn!("Location update failed: {err}");
        self.present_error(&Error::from(err))
    }

    /// Raises an alert for the error unless it is silent or
    /// another alert is still showing.
    pub fn present_error(&self, err: &Error) -> bool {
        if err.is_silent() {
            return false;
        }
        self.gate.try_show(&*self.alerts, err.to_string())
    }
}
