//! Notifications
//!
//! User-visible messages raised by the checkout and catalog flows. The
//! [`Notifier`] decides how they reach the shopper.

use std::sync::{Arc, Mutex, PoisonError};

use mockall::automock;
use tracing::{info, warn};

/// How prominently a notification should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Informational.
    #[default]
    Default,

    /// Something went wrong.
    Destructive,
}

/// A short message for the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Headline
    pub title: String,

    /// Body text
    pub description: String,

    /// Presentation
    pub variant: Variant,
}

impl Notification {
    /// An informational notification.
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Variant::Default,
        }
    }

    /// An error notification.
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Variant::Destructive,
        }
    }
}

/// Delivers notifications to the shopper.
#[automock]
pub trait Notifier: Send + Sync {
    /// Show `notification`.
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.variant {
            Variant::Default => info!(
                title = %notification.title,
                "{}", notification.description
            ),
            Variant::Destructive => warn!(
                title = %notification.title,
                "{}", notification.description
            ),
        }
    }
}

/// Buffers notifications until the caller drains them.
#[derive(Debug, Clone, Default)]
pub struct CollectingNotifier {
    pending: Arc<Mutex<Vec<Notification>>>,
}

impl CollectingNotifier {
    /// An empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every notification raised so far, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);

        std::mem::take(&mut *pending)
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notification: Notification) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collecting_notifier_drains_in_order() {
        let notifier = CollectingNotifier::new();

        notifier.notify(Notification::info("a", "first"));
        notifier.notify(Notification::destructive("b", "second"));

        let drained = notifier.drain();

        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].description, "first");
        assert_eq!(drained[1].variant, Variant::Destructive);
        assert!(notifier.drain().is_empty());
    }
}
