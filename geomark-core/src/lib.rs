//! # geomark-core
//!
//! The presentation policy of the location screens: which text is shown,
//! when an alert is raised and which requests go out to the gateways.
//! All I/O happens behind the traits in [`gateways`].

pub mod alert_gate;
pub mod error;
pub mod gateways;
pub mod presenter;
pub mod search;
pub mod tracking;


pub mod entities {
    pub use geomark_entities::{
        address::*, alert::*, geo::*, location::*, mark::*, placemark::*, region::*, time::*,
    };
}

pub mod prelude {
    pub use super::{
        alert_gate::{AlertGate, DismissHandle},
        entities::*,
        error::Error,
        gateways::{alert::*, geocode::*, location::*, view::*},
        presenter::LocationPresenter,
        search::SearchController,
        tracking::{TrackingController, TrackingState},
    };
}
