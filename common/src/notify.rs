//! Operator notification sink.
//!
//! Workflow operations return [`crate::Result`]; the caller turns the
//! outcome into a [`Notification`] and hands it to whatever sink the host
//! provides. Delivery is fire-and-forget.

use tracing::{error, info};

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation completed.
    Success,
    /// Operation aborted; the body carries the reason.
    Error,
}

/// An operator-facing notification.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Severity of the event.
    pub severity: Severity,
    /// Short title.
    pub title: String,
    /// Detail text.
    pub body: String,
}

impl Notification {
    /// Build a success notification.
    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Build an error notification.
    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Destination for operator notifications.
pub trait NotificationSink: Send + Sync {
    /// Deliver a notification. No return value; failures to deliver are
    /// the sink's problem.
    fn notify(&self, notification: Notification);
}

/// Sink that writes notifications to the tracing log.
#[derive(Debug, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Success => {
                info!(title = %notification.title, body = %notification.body, "notification")
            }
            Severity::Error => {
                error!(title = %notification.title, body = %notification.body, "notification")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_builders() {
        let ok = Notification::success("Confirmed", "Transaction confirmed");
        assert_eq!(ok.severity, Severity::Success);

        let err = Notification::error("Error", "Insufficient funds");
        assert_eq!(err.severity, Severity::Error);
    }
}
