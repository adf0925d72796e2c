//! Latest assistant activity for pages that cannot hold an event stream open.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::broadcast::error::RecvError;

use voicehome_app::event_bus::InProcessEventBus;
use voicehome_domain::event::Notification;
use voicehome_domain::listening::ListeningStatus;

/// What the assistant is doing and what it said last.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Activity {
    pub status: ListeningStatus,
    pub last_response: Option<String>,
}

/// Folds the event bus into an [`Activity`] that handlers can read.
#[derive(Debug, Default)]
pub struct ActivityTracker {
    inner: Mutex<Activity>,
}

impl ActivityTracker {
    /// Subscribe to `bus` and keep a tracker up to date on a background task.
    ///
    /// The task ends when the bus closes or the tracker is dropped.
    pub fn spawn(bus: &InProcessEventBus) -> Arc<Self> {
        let tracker = Arc::new(Self::default());
        let mut events = bus.subscribe();
        let weak: Weak<Self> = Arc::downgrade(&tracker);
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        let Some(tracker) = weak.upgrade() else {
                            break;
                        };
                        tracker.record(&event.notification);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "activity tracker lagged behind the event bus");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
        tracker
    }

    /// Apply one notification. Anything other than status changes and
    /// announcements is ignored.
    pub fn record(&self, notification: &Notification) {
        match notification {
            Notification::ListeningStatus { status } => self.lock().status = *status,
            Notification::AssistantResponse { text } => {
                self.lock().last_response = Some(text.clone());
            }
            _ => {}
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Activity {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Activity> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
