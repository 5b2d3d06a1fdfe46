use crate::{alert_gate::DismissHandle, entities::Alert};

pub trait AlertPresenter {
    /// Shows the alert until the user dismisses it.
    ///
    /// The presenter must call [`DismissHandle::dismiss`] once the alert is gone.
    fn present(&self, alert: &Alert, on_dismiss: DismissHandle);
}
