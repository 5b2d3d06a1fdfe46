use std::rc::Rc;

use crate::{
    entities::*,
    error::Error,
    gateways::{
        geocode::{GeocodeDispatcher, GeocodingResult},
        location::LocationGateway,
    },
    presenter::LocationPresenter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    Unauthorized,
    /// Updates are running. There is no way back.
    Authorized,
}

/// Owns the location subscription of the tracking screen.
pub struct TrackingController {
    location: Rc<dyn LocationGateway>,
    geocoder: Rc<dyn GeocodeDispatcher>,
    presenter: LocationPresenter,
    settings: UpdateSettings,
    state: TrackingState,
}

impl TrackingController {
    pub fn new(
        location: Rc<dyn LocationGateway>,
        geocoder: Rc<dyn GeocodeDispatcher>,
        presenter: LocationPresenter,
    ) -> Self {
        Self {
            location,
            geocoder,
            presenter,
            settings: UpdateSettings::default(),
            state: TrackingState::Unauthorized,
        }
    }

    pub fn with_settings(mut self, settings: UpdateSettings) -> Self {
        self.settings = settings;
        self
    }

    pub const fn state(&self) -> TrackingState {
        self.state
    }

    pub fn presenter(&self) -> &LocationPresenter {
        &self.presenter
    }

    /// Starts the updates, asking for permission first if needed.
    pub fn start(&mut self) {
        match self.location.authorization() {
            Authorization::AuthorizedWhenInUse => self.activate(),
            Authorization::Denied => {
                self.presenter.present_location_error(LocationError::Denied);
            }
            Authorization::NotDetermined => {
                log::info!("Requesting location access");
                self.location.request_when_in_use_authorization();
            }
        }
    }

    pub fn handle_event(&mut self, event: LocationEvent) {
        match event {
            LocationEvent::Updated(fixes) => {
                if let Some(fix) = fixes.last() {
                    self.on_fix(fix);
                }
            }
            LocationEvent::Failed(err) => {
                self.presenter.present_location_error(err);
            }
            LocationEvent::AuthorizationChanged(authorization) => {
                self.on_authorization_changed(authorization);
            }
        }
    }

    fn on_authorization_changed(&mut self, authorization: Authorization) {
        log::info!("Location authorization changed to {authorization}");
        match authorization {
            Authorization::AuthorizedWhenInUse => self.activate(),
            Authorization::Denied => {
                self.presenter.present_location_error(LocationError::Denied);
            }
            Authorization::NotDetermined => {}
        }
    }

    fn activate(&mut self) {
        if self.state == TrackingState::Authorized {
            return;
        }
        log::info!(
            "Starting location updates (accuracy: {}, distance filter: {:?})",
            self.settings.accuracy,
            self.settings.distance_filter
        );
        self.location.start_updates(self.settings);
        self.state = TrackingState::Authorized;
    }

    fn on_fix(&self, fix: &Fix) {
        let pos = self.presenter.present_fix(fix);
        self.geocoder.dispatch_reverse(pos);
    }

    pub fn on_reverse_geocoded(&self, pos: Coordinate, result: GeocodingResult) {
        log::debug!("Reverse geocoding of {pos} completed");
        self.presenter.present_address(result);
    }

    /// Captures the currently displayed coordinates.
    ///
    /// Marks are only logged.
    pub fn mark_current_location(&self) -> Result<MarkedLocation, Error> {
        let coordinates = self.presenter.coordinates_text();
        if coordinates.is_empty() {
            let err = Error::NoLocationToMark;
            self.presenter.present_error(&err);
            return Err(err);
        }
        log::info!("Marked Geocache Location: {coordinates}");
        Ok(MarkedLocation {
            coordinates,
            marked_at: Timestamp::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{alert_gate::AlertGate, gateways::geocode::GeocodingError, tests::*};
    use crate::gateways::view::LocationView;
    use geomark_entities::builders::*;

    struct Screen {
        controller: TrackingController,
        location: Rc<MockLocation>,
        geocoder: Rc<MockDispatcher>,
        view: Rc<MockView>,
        alerts: Rc<MockAlerts>,
    }

    fn screen(authorization: Authorization) -> Screen {
        let location = Rc::new(MockLocation::new(authorization));
        let geocoder = Rc::new(MockDispatcher::default());
        let view = Rc::new(MockView::default());
        let alerts = Rc::new(MockAlerts::default());
        let presenter = LocationPresenter::new(view.clone(), alerts.clone(), AlertGate::new());
        let controller = TrackingController::new(location.clone(), geocoder.clone(), presenter);
        Screen {
            controller,
            location,
            geocoder,
            view,
            alerts,
        }
    }

    fn fix(lat: f64, lng: f64) -> Fix {
        Fix::now(Coordinate::from_lat_lng_deg(lat, lng))
    }

    fn address(locality: &str, admin_area: &str, country: &str) -> GeocodingResult {
        Ok(vec![Placemark::build()
            .address(
                Address::build()
                    .locality(locality)
                    .admin_area(admin_area)
                    .country(country)
                    .finish(),
            )
            .finish()])
    }

    #[test]
    fn request_permission_before_starting() {
        let mut s = screen(Authorization::NotDetermined);
        s.controller.start();
        assert_eq!(1, s.location.requested.get());
        assert!(s.location.started.borrow().is_empty());
        assert_eq!(TrackingState::Unauthorized, s.controller.state());

        s.controller
            .handle_event(LocationEvent::AuthorizationChanged(Authorization::AuthorizedWhenInUse));
        assert_eq!(TrackingState::Authorized, s.controller.state());
        assert_eq!(vec![UpdateSettings::default()], *s.location.started.borrow());
    }

    #[test]
    fn start_right_away_when_authorized() {
        let mut s = screen(Authorization::AuthorizedWhenInUse);
        s.controller.start();
        assert_eq!(0, s.location.requested.get());
        assert_eq!(TrackingState::Authorized, s.controller.state());
        let settings = s.location.started.borrow()[0];
        assert_eq!(Accuracy::Best, settings.accuracy);
        assert_eq!(DistanceFilter::None, settings.distance_filter);
    }

    #[test]
    fn updates_are_started_only_once() {
        let mut s = screen(Authorization::AuthorizedWhenInUse);
        s.controller.start();
        s.controller
            .handle_event(LocationEvent::AuthorizationChanged(Authorization::AuthorizedWhenInUse));
        assert_eq!(1, s.location.started.borrow().len());
    }

    #[test]
    fn denied_permission_raises_alert() {
        let mut s = screen(Authorization::NotDetermined);
        s.controller.start();
        s.controller
            .handle_event(LocationEvent::AuthorizationChanged(Authorization::Denied));
        assert_eq!(TrackingState::Unauthorized, s.controller.state());
        assert_eq!(
            vec!["Location access has been denied. Please enable location services for this app in Settings."],
            s.alerts.messages()
        );
    }

    #[test]
    fn start_with_denied_permission_raises_alert() {
        let mut s = screen(Authorization::Denied);
        s.controller.start();
        assert_eq!(0, s.location.requested.get());
        assert!(s.location.started.borrow().is_empty());
        assert_eq!(TrackingState::Unauthorized, s.controller.state());
        assert_eq!(
            vec!["Location access has been denied. Please enable location services for this app in Settings."],
            s.alerts.messages()
        );

        // Starting again while the alert shows raises no second alert.
        s.controller.start();
        assert_eq!(1, s.alerts.messages().len());
        assert!(s.location.started.borrow().is_empty());
    }

    #[test]
    fn fix_is_shown_before_geocoding_completes() {
        let mut s = screen(Authorization::AuthorizedWhenInUse);
        s.controller.start();
        s.controller
            .handle_event(LocationEvent::Updated(vec![fix(47.6062, -122.3321)]));
        assert_eq!("Lat: 47.6062, Lon: -122.3321", s.view.coordinates_text());
        assert_eq!("", *s.view.address.borrow());
        assert_eq!(
            vec![Coordinate::from_lat_lng_deg(47.6062, -122.3321)],
            *s.geocoder.reverse.borrow()
        );

        s.controller.on_reverse_geocoded(
            Coordinate::from_lat_lng_deg(47.6062, -122.3321),
            address("Seattle", "WA", "USA"),
        );
        assert_eq!("Seattle, WA, USA", *s.view.address.borrow());
    }

    #[test]
    fn last_fix_of_a_batch_is_presented() {
        let mut s = screen(Authorization::AuthorizedWhenInUse);
        s.controller.start();
        s.controller.handle_event(LocationEvent::Updated(vec![
            fix(1.0, 2.0),
            fix(3.5, 4.25),
        ]));
        assert_eq!("Lat: 3.5, Lon: 4.25", s.view.coordinates_text());
        assert_eq!(1, s.geocoder.reverse.borrow().len());
        s.controller.handle_event(LocationEvent::Updated(vec![]));
        assert_eq!(1, s.geocoder.reverse.borrow().len());
    }

    #[test]
    fn last_completed_geocoding_wins() {
        let mut s = screen(Authorization::AuthorizedWhenInUse);
        s.controller.start();
        let first = Coordinate::from_lat_lng_deg(47.6062, -122.3321);
        let second = Coordinate::from_lat_lng_deg(45.5152, -122.6784);
        s.controller
            .handle_event(LocationEvent::Updated(vec![Fix::now(first)]));
        s.controller
            .handle_event(LocationEvent::Updated(vec![Fix::now(second)]));
        assert_eq!(vec![first, second], *s.geocoder.reverse.borrow());

        // The geocoder answers out of order: the stale answer is shown.
        s.controller
            .on_reverse_geocoded(second, address("Portland", "OR", "USA"));
        s.controller
            .on_reverse_geocoded(first, address("Seattle", "WA", "USA"));
        assert_eq!("Seattle, WA, USA", *s.view.address.borrow());
        assert_eq!("Lat: 45.5152, Lon: -122.6784", s.view.coordinates_text());
    }

    #[test]
    fn geocoding_failure_is_shown_in_address_label() {
        let s = screen(Authorization::AuthorizedWhenInUse);
        s.controller.on_reverse_geocoded(
            Coordinate::from_lat_lng_deg(0.0, 0.0),
            Err(GeocodingError::Service("The operation couldn't be completed".into())),
        );
        assert_eq!(
            "Error: The operation couldn't be completed",
            *s.view.address.borrow()
        );
        assert!(s.alerts.messages().is_empty());
    }

    #[test]
    fn location_errors_raise_one_alert_at_a_time() {
        let mut s = screen(Authorization::AuthorizedWhenInUse);
        s.controller.start();
        s.controller
            .handle_event(LocationEvent::Failed(LocationError::LocationUnknown));
        s.controller
            .handle_event(LocationEvent::Failed(LocationError::Other("gps".into())));
        assert_eq!(
            vec!["Location services are temporarily unavailable. Please try again later."],
            s.alerts.messages()
        );
        s.alerts.dismiss_last();
        s.controller
            .handle_event(LocationEvent::Failed(LocationError::Other("gps".into())));
        assert_eq!(
            "Failed to find user's location: gps",
            s.alerts.messages()[1]
        );
    }

    #[test]
    fn mark_without_location_raises_alert() {
        let s = screen(Authorization::AuthorizedWhenInUse);
        assert_eq!(
            Err(Error::NoLocationToMark),
            s.controller.mark_current_location()
        );
        assert_eq!(vec!["No location data available to mark."], s.alerts.messages());
    }

    #[test]
    fn mark_captures_displayed_coordinates() {
        let mut s = screen(Authorization::AuthorizedWhenInUse);
        s.controller.start();
        s.controller
            .handle_event(LocationEvent::Updated(vec![fix(47.6062, -122.3321)]));
        let mark = s.controller.mark_current_location().unwrap();
        assert_eq!("Lat: 47.6062, Lon: -122.3321", mark.coordinates);
        assert!(s.alerts.messages().is_empty());
    }
}
