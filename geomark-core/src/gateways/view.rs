use crate::entities::{MapMarker, MapRegion};

/// The labels of the tracking screen.
pub trait LocationView {
    fn coordinates_text(&self) -> String;
    fn set_coordinates_text(&self, text: &str);
    fn set_address_text(&self, text: &str);
}

pub trait MapView {
    fn set_region(&self, region: MapRegion);
    fn add_marker(&self, marker: MapMarker);
}

/// The text field of the search screen.
pub trait SearchInput {
    /// Drops the keyboard focus.
    fn resign_focus(&self);
}
