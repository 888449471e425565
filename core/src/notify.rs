//! Outcome events for transient user-facing display.
//!
//! A `NotificationSink` only displays; nothing is acknowledged back to the
//! controller, so `notify` is synchronous and infallible.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Failure,
    /// The form was cleared by the user.
    Cleared,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

impl<S: NotificationSink + ?Sized> NotificationSink for Arc<S> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

/// Title/description text for each event. Replace to localize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub success: (String, String),
    pub failure: (String, String),
    pub cleared: (String, String),
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            success: ("Sent successfully!".into(), "Your answers were sent by email.".into()),
            failure: ("Error".into(), "Could not send your answers. Please try again later.".into()),
            cleared: ("Form cleared".into(), "All fields were cleared.".into()),
        }
    }
}

impl Messages {
    pub fn success(&self) -> Notification {
        Self::build(NotificationKind::Success, &self.success)
    }

    pub fn failure(&self) -> Notification {
        Self::build(NotificationKind::Failure, &self.failure)
    }

    /// Failure event that lists the constraint violations.
    pub fn invalid(&self, issues: &[String]) -> Notification {
        let mut notification = self.failure();
        notification.description = format!("{} ({})", notification.description, issues.join("; "));
        notification
    }

    pub fn cleared(&self) -> Notification {
        Self::build(NotificationKind::Cleared, &self.cleared)
    }

    fn build(kind: NotificationKind, (title, description): &(String, String)) -> Notification {
        Notification {
            kind,
            title: title.clone(),
            description: description.clone(),
        }
    }
}

/// Renders notifications as log lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, n: Notification) {
        match n.kind {
            NotificationKind::Failure => tracing::warn!(title = %n.title, "{}", n.description),
            _ => tracing::info!(title = %n.title, "{}", n.description),
        }
    }
}

/// Forwards notifications to a UI task. Events are dropped once the receiver
/// is gone.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotificationSink for ChannelSink {
    fn notify(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            tracing::debug!("notification receiver dropped");
        }
    }
}

/// Keeps every notification in memory, oldest first.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<Notification>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Notification> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn count(&self, kind: NotificationKind) -> usize {
        self.events().iter().filter(|n| n.kind == kind).count()
    }
}

impl NotificationSink for MemorySink {
    fn notify(&self, notification: Notification) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification);
    }
}
