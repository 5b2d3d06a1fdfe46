use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::{entities::Alert, gateways::alert::AlertPresenter};

/// Lets at most one alert of a screen be visible at a time.
///
/// Alerts that arrive while another one is showing are dropped, not queued.
#[derive(Debug, Clone, Default)]
pub struct AlertGate {
    showing: Arc<AtomicBool>,
}

impl AlertGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_showing(&self) -> bool {
        self.showing.load(Ordering::Acquire)
    }

    /// Presents an error alert unless another alert is still showing.
    pub fn try_show<P>(&self, presenter: &P, message: impl Into<String>) -> bool
    where
        P: AlertPresenter + ?Sized,
    {
        let message = message.into();
        if self
            .showing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::debug!("An alert is already showing, dropping: {message}");
            return false;
        }
        let on_dismiss = DismissHandle {
            showing: Arc::clone(&self.showing),
        };
        presenter.present(&Alert::error(message), on_dismiss);
        true
    }
}

/// Re-opens the [`AlertGate`] that issued it.
#[derive(Debug)]
#[must_use = "the gate stays closed until the alert is dismissed"]
pub struct DismissHandle {
    showing: Arc<AtomicBool>,
}

impl DismissHandle {
    pub fn dismiss(self) {
        self.showing.store(false, Ordering::Release);
    }
}
