use std::{
    cell::{Cell, RefCell},
    time::Duration,
};

use geomark_core::{
    entities::{Authorization, LocationEvent, UpdateSettings},
    gateways::location::LocationGateway,
};
use geomark_gateways::track::apply_distance_filter;
use tokio::sync::mpsc::UnboundedSender;

use crate::screen::UiEvent;

const MIN_REPLAY_INTERVAL: Duration = Duration::from_millis(1);

/// Simulates the device location service by replaying a recorded track.
pub struct TrackReplay {
    track: RefCell<Option<Vec<LocationEvent>>>,
    interval: Duration,
    authorization: Cell<Authorization>,
    permission_answer: Authorization,
    events: UnboundedSender<UiEvent>,
}

impl TrackReplay {
    pub fn new(
        track: Vec<LocationEvent>,
        interval: Duration,
        permission_answer: Authorization,
        events: UnboundedSender<UiEvent>,
    ) -> Self {
        Self {
            track: RefCell::new(Some(track)),
            interval,
            authorization: Cell::new(Authorization::NotDetermined),
            permission_answer,
            events,
        }
    }

    fn send(&self, event: LocationEvent) {
        if self.events.send(UiEvent::Location(event)).is_err() {
            log::debug!("Dropping location event: the UI has been closed");
        }
    }
}

impl LocationGateway for TrackReplay {
    fn authorization(&self) -> Authorization {
        self.authorization.get()
    }

    fn request_when_in_use_authorization(&self) {
        if self.authorization.get() != Authorization::NotDetermined {
            return;
        }
        self.authorization.set(self.permission_answer);
        self.send(LocationEvent::AuthorizationChanged(self.permission_answer));
    }

    fn start_updates(&self, settings: UpdateSettings) {
        let Some(track) = self.track.borrow_mut().take() else {
            log::debug!("Location updates are already running");
            return;
        };
        if let Some(meters) = settings.accuracy.meters() {
            log::debug!("Recorded fixes are replayed as is (requested accuracy: {meters} m)");
        }
        let track = apply_distance_filter(track, settings.distance_filter);
        log::info!("Replaying {} location events", track.len());
        let events = self.events.clone();
        let period = self.interval.max(MIN_REPLAY_INTERVAL);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            for event in track {
                interval.tick().await;
                if events.send(UiEvent::Location(event)).is_err() {
                    return;
                }
            }
            log::info!("End of the recorded track");
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geomark_core::entities::{Coordinate, Fix, LocationError};
    use tokio::sync::mpsc;

    fn track() -> Vec<LocationEvent> {
        vec![
            LocationEvent::Updated(vec![Fix::now(Coordinate::from_lat_lng_deg(1.0, 2.0))]),
            LocationEvent::Failed(LocationError::LocationUnknown),
        ]
    }

    #[tokio::test]
    async fn permission_answer_is_delivered_as_event() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let replay = TrackReplay::new(track(), Duration::ZERO, Authorization::Denied, tx);
        assert_eq!(Authorization::NotDetermined, replay.authorization());
        replay.request_when_in_use_authorization();
        replay.request_when_in_use_authorization();
        assert_eq!(Authorization::Denied, replay.authorization());
        assert!(matches!(
            rx.recv().await,
            Some(UiEvent::Location(LocationEvent::AuthorizationChanged(
                Authorization::Denied
            )))
        ));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn replay_track_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let replay = TrackReplay::new(
            track(),
            Duration::from_millis(1),
            Authorization::AuthorizedWhenInUse,
            tx,
        );
        replay.start_updates(UpdateSettings::default());
        replay.start_updates(UpdateSettings::default());
        assert!(matches!(
            rx.recv().await,
            Some(UiEvent::Location(LocationEvent::Updated(_)))
        ));
        assert!(matches!(
            rx.recv().await,
            Some(UiEvent::Location(LocationEvent::Failed(
                LocationError::LocationUnknown
            )))
        ));
    }
}
