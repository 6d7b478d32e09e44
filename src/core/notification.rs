//! Notifications raised by the turn controller.
//!
//! The controller does not know how they are shown. The TUI turns them into
//! expiring toasts, the one-shot `say` command records them and prints the
//! first error.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Keeps every notification in order. Used by tests and by callers that want
/// to inspect what happened after a turn.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub received: Vec<Notification>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: Notification) {
        self.received.push(notification);
    }
}

impl RecordingNotifier {
    pub fn errors(&self) -> impl Iterator<Item = &Notification> {
        self.received.iter().filter(|n| n.is_error())
    }
}
