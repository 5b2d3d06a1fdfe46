#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # geomark-entities
//!
//! Reusable, agnostic domain entities for geomark.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod address;
pub mod alert;
pub mod geo;
pub mod location;
pub mod mark;
pub mod placemark;
pub mod region;
pub mod time;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
