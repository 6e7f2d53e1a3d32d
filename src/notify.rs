//! Notification channel between screens and the renderer
//!
//! Screens hold a [`Notifier`] and post into it; the shell owns the matching
//! [`NotificationCenter`], drains it after every action and keeps the drained
//! notifications on a [`ToastBoard`] until they auto-dismiss.

use chrono::{DateTime, Duration, Local};
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    /// Blocking-style validation notice
    Alert,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub posted_at: DateTime<Local>,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    sender: UnboundedSender<Notification>,
}

impl Notifier {
    pub fn success(&self, message: impl Into<String>) {
        self.post(NotificationLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.post(NotificationLevel::Error, message.into());
    }

    pub fn alert(&self, message: impl Into<String>) {
        self.post(NotificationLevel::Alert, message.into());
    }

    fn post(&self, level: NotificationLevel, message: String) {
        let notification = Notification {
            level,
            message,
            posted_at: Local::now(),
        };
        // A dropped center means nobody is rendering; the notice is discarded.
        let _ = self.sender.send(notification);
    }
}

pub struct NotificationCenter {
    receiver: UnboundedReceiver<Notification>,
}

impl NotificationCenter {
    pub fn channel() -> (Notifier, NotificationCenter) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Notifier { sender }, NotificationCenter { receiver })
    }

    /// Everything posted since the last drain, oldest first
    pub fn drain(&mut self) -> Vec<Notification> {
        let mut drained = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(notification) => drained.push(notification),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        drained
    }
}

/// Notifications currently on screen, newest first
pub struct ToastBoard {
    auto_close: Duration,
    toasts: Vec<Notification>,
}

impl ToastBoard {
    pub fn new(auto_close_ms: u64) -> Self {
        Self {
            auto_close: Duration::milliseconds(auto_close_ms as i64),
            toasts: Vec::new(),
        }
    }

    pub fn show(&mut self, notification: Notification) {
        self.toasts.insert(0, notification);
    }

    /// Drop toasts older than the auto-close timeout.
    pub fn prune(&mut self, now: DateTime<Local>) {
        let auto_close = self.auto_close;
        self.toasts
            .retain(|toast| now.signed_duration_since(toast.posted_at) < auto_close);
    }

    pub fn visible(&self) -> &[Notification] {
        &self.toasts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_returns_posts_in_order() {
        let (notifier, mut center) = NotificationCenter::channel();
        notifier.error("first");
        notifier.clone().success("second");

        let drained = center.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].level, NotificationLevel::Error);
        assert_eq!(drained[0].message, "first");
        assert_eq!(drained[1].level, NotificationLevel::Success);
        assert!(center.drain().is_empty());
    }

    #[test]
    fn test_post_after_center_dropped_is_ignored() {
        let (notifier, center) = NotificationCenter::channel();
        drop(center);
        notifier.alert("nobody listening");
    }

    #[test]
    fn test_toasts_auto_dismiss() {
        let (notifier, mut center) = NotificationCenter::channel();
        let mut board = ToastBoard::new(3000);

        notifier.success("uploaded");
        for toast in center.drain() {
            board.show(toast);
        }
        let posted_at = board.visible()[0].posted_at;

        board.prune(posted_at + Duration::milliseconds(2999));
        assert_eq!(board.visible().len(), 1);

        board.prune(posted_at + Duration::milliseconds(3000));
        assert!(board.visible().is_empty());
    }
}
