/// Title of every error alert.
pub const ERROR_TITLE: &str = "Error";

/// Label of the single action that dismisses an alert.
pub const DISMISS_ACTION: &str = "OK";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: ERROR_TITLE.to_string(),
            message: message.into(),
        }
    }
}
