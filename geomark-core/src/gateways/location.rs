use crate::entities::{Authorization, UpdateSettings};

/// A device location service.
///
/// Fixes, errors and authorization changes are reported asynchronously
/// as [`LocationEvent`](crate::entities::LocationEvent)s.
pub trait LocationGateway {
    fn authorization(&self) -> Authorization;
    /// The answer arrives as an authorization change.
    fn request_when_in_use_authorization(&self);
    fn start_updates(&self, settings: UpdateSettings);
}
