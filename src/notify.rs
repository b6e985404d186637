//! # Transient Notifications
//!
//! One slot holding the message currently shown to the operator. A new
//! notification replaces the previous one, and each notification clears itself
//! after its kind's timeout unless something newer has taken the slot.
//!
//! ```rust
//! use order_console::notify::{Notifier, NotificationKind, NotifyConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let notifier = Notifier::new(NotifyConfig::default());
//!     notifier.success("Compra realizada con éxito!");
//!     assert_eq!(notifier.current().unwrap().kind, NotificationKind::Success);
//! }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Monotonic per notifier; identifies which expiry may clear it.
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// How long each kind stays visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifyConfig {
    pub success_ttl: Duration,
    pub error_ttl: Duration,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            success_ttl: Duration::from_millis(3000),
            error_ttl: Duration::from_millis(3000),
        }
    }
}

struct Inner {
    slot: watch::Sender<Option<Notification>>,
    next_id: AtomicU64,
    config: NotifyConfig,
}

/// Handle to the notification slot. Cloning shares the slot.
///
/// Expiry timers are spawned on the current Tokio runtime.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<Inner>,
}

impl Notifier {
    pub fn new(config: NotifyConfig) -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                slot,
                next_id: AtomicU64::new(1),
                config,
            }),
        }
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.notify(message, NotificationKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.notify(message, NotificationKind::Error)
    }

    /// Shows `message`, replacing whatever is shown, and schedules its expiry.
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let ttl = match kind {
            NotificationKind::Success => self.inner.config.success_ttl,
            NotificationKind::Error => self.inner.config.error_ttl,
        };
        let notification = Notification {
            id,
            kind,
            message: message.into(),
        };
        debug!(id, ?kind, message = %notification.message, "Notify");
        self.inner.slot.send_replace(Some(notification));

        let inner = self.inner.clone();
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            inner.slot.send_if_modified(|current| match current {
                Some(shown) if shown.id == id => {
                    *current = None;
                    true
                }
                _ => false,
            });
        });
        id
    }

    pub fn current(&self) -> Option<Notification> {
        self.inner.slot.borrow().clone()
    }

    pub fn dismiss(&self) {
        self.inner.slot.send_replace(None);
    }

    /// Observe changes to the slot, expiries included.
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.inner.slot.subscribe()
    }
}
