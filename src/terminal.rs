//! Terminal rendering of the screens.

use std::cell::RefCell;

use geomark_core::{
    alert_gate::DismissHandle,
    entities::{Alert, MapMarker, MapRegion, DISMISS_ACTION},
    gateways::{alert::AlertPresenter, view::*},
};

#[derive(Default)]
pub struct TerminalLabels {
    coordinates: RefCell<String>,
    address: RefCell<String>,
}

impl TerminalLabels {
    #[cfg(test)]
    pub fn address_text(&self) -> String {
        self.address.borrow().clone()
    }
}

impl LocationView for TerminalLabels {
    fn coordinates_text(&self) -> String {
        self.coordinates.borrow().clone()
    }

    fn set_coordinates_text(&self, text: &str) {
        *self.coordinates.borrow_mut() = text.to_owned();
        println!("{text}");
    }

    fn set_address_text(&self, text: &str) {
        *self.address.borrow_mut() = text.to_owned();
        println!("{text}");
    }
}

#[derive(Default)]
pub struct TerminalMap {
    markers: RefCell<Vec<MapMarker>>,
}

impl TerminalMap {
    #[cfg(test)]
    pub fn markers(&self) -> Vec<MapMarker> {
        self.markers.borrow().clone()
    }
}

impl MapView for TerminalMap {
    fn set_region(&self, region: MapRegion) {
        println!(
            "Map centered on {} ({:.5}° x {:.5}°)",
            region.center,
            region.lat_delta_deg(),
            region.lng_delta_deg()
        );
    }

    fn add_marker(&self, marker: MapMarker) {
        println!("Pin '{}' at {}", marker.label, marker.pos);
        self.markers.borrow_mut().push(marker);
    }
}

/// The command line has no focus to give up.
pub struct TerminalInput;

impl SearchInput for TerminalInput {
    fn resign_focus(&self) {
        log::trace!("Search input resigned focus");
    }
}

/// Shows alerts until they are acknowledged with the dismiss command.
#[derive(Default)]
pub struct TerminalAlerts {
    open: RefCell<Vec<(Alert, DismissHandle)>>,
}

impl TerminalAlerts {
    #[cfg(test)]
    pub fn open_alerts(&self) -> Vec<Alert> {
        self.open.borrow().iter().map(|(alert, _)| alert.clone()).collect()
    }

    /// Dismisses the most recent alert.
    pub fn dismiss(&self) -> Option<Alert> {
        let (alert, handle) = self.open.borrow_mut().pop()?;
        handle.dismiss();
        Some(alert)
    }
}

impl AlertPresenter for TerminalAlerts {
    fn present(&self, alert: &Alert, on_dismiss: DismissHandle) {
        eprintln!(
            "[{}] {} (type '{}' to dismiss)",
            alert.title,
            alert.message,
            DISMISS_ACTION.to_lowercase()
        );
        self.open.borrow_mut().push((alert.clone(), on_dismiss));
    }
}
