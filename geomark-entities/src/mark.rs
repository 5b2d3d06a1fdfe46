use crate::time::Timestamp;

/// The coordinates text captured when the user marks a geocache location.
///
/// Marks are not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedLocation {
    pub coordinates: String,
    pub marked_at: Timestamp,
}
