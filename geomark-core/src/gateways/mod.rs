pub mod alert;
pub mod geocode;
pub mod location;
pub mod view;
