use geomark_core::{entities::Coordinate, gateways::geocode::*};
use tokio::sync::mpsc::UnboundedSender;

use crate::{gateways::GeocodingGw, screen::UiEvent};

/// Runs geocoding requests on the blocking thread pool and sends the
/// completions back to the UI task.
pub struct BlockingDispatcher {
    gateway: GeocodingGw,
    events: UnboundedSender<UiEvent>,
}

impl BlockingDispatcher {
    pub fn new(gateway: GeocodingGw, events: UnboundedSender<UiEvent>) -> Self {
        Self { gateway, events }
    }

    fn spawn<F>(&self, request: F)
    where
        F: FnOnce(&GeocodingGw) -> UiEvent + Send + 'static,
    {
        let gateway = self.gateway.clone();
        let events = self.events.clone();
        tokio::task::spawn_blocking(move || {
            let completion = request(&gateway);
            if events.send(completion).is_err() {
                log::debug!("Dropping geocoding completion: the UI has been closed");
            }
        });
    }
}

impl GeocodeDispatcher for BlockingDispatcher {
    fn dispatch_forward(&self, query: String) {
        self.spawn(move |gw| {
            let result = gw.forward(&query);
            UiEvent::ForwardGeocoded { query, result }
        });
    }

    fn dispatch_reverse(&self, pos: Coordinate) {
        self.spawn(move |gw| {
            let result = gw.reverse(pos);
            UiEvent::ReverseGeocoded { pos, result }
        });
    }
}
