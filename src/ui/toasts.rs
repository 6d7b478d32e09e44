use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::core::notification::{Notification, Notifier};

pub const TOAST_TTL: Duration = Duration::from_secs(4);
const MAX_TOASTS: usize = 3;

#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    pub shown_at: Instant,
}

/// On-screen notifications, newest last. Older toasts are dropped once more
/// than three are queued.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_at(&mut self, notification: Notification, now: Instant) {
        self.toasts.push_back(Toast {
            notification,
            shown_at: now,
        });
        while self.toasts.len() > MAX_TOASTS {
            self.toasts.pop_front();
        }
    }

    /// Drop expired toasts. Returns true if anything was removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        self.toasts
            .retain(|toast| now.saturating_duration_since(toast.shown_at) < TOAST_TTL);
        before != self.toasts.len()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_ttl() {
        let start = Instant::now();
        let mut queue = ToastQueue::new();
        queue.push_at(Notification::success("a", "first"), start);
        queue.push_at(
            Notification::error("b", "second"),
            start + Duration::from_secs(2),
        );

        assert!(!queue.prune(start + Duration::from_secs(3)));
        assert!(queue.prune(start + TOAST_TTL));
        let titles: Vec<_> = queue.visible().map(|t| t.notification.title.as_str()).collect();
        assert_eq!(titles, vec!["b"]);
    }

    #[test]
    fn queue_keeps_newest_three() {
        let now = Instant::now();
        let mut queue = ToastQueue::new();
        for title in ["1", "2", "3", "4"] {
            queue.push_at(Notification::success(title, ""), now);
        }
        let titles: Vec<_> = queue.visible().map(|t| t.notification.title.as_str()).collect();
        assert_eq!(titles, vec!["2", "3", "4"]);
    }
}
