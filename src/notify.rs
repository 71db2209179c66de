//! Fire-and-forget presentation notifications.
//!
//! The engine queues transient messages ("effect X triggered") for the
//! presentation layer to drain and display. Failing to display one is not
//! an error anywhere in the core; the queue is the whole contract.

/// Classification tag for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Effect,
    Battle,
    Warning,
}

/// Default on-screen duration, in seconds.
pub const DEFAULT_NOTIFICATION_SECS: f32 = 2.5;

/// A transient on-screen message request.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub duration_secs: f32,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration_secs: DEFAULT_NOTIFICATION_SECS,
            kind,
        }
    }

    pub fn with_duration(mut self, secs: f32) -> Self {
        self.duration_secs = secs;
        self
    }
}
