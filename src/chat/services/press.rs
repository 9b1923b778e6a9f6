//! Cancellable long-press timer.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Holds at most one outstanding long-press timer.
///
/// Starting a new press aborts the previous timer, so a gesture can fire
/// its action at most once.
#[derive(Debug, Default)]
pub struct PressTimer {
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl PressTimer {
    /// Creates an idle timer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `on_fire` after `dwell` unless cancelled first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, dwell: Duration, on_fire: impl FnOnce() + Send + 'static) {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(dwell).await;
            on_fire();
        });
        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(stale) = previous {
            stale.abort();
        }
    }

    /// Aborts the outstanding timer. Returns `true` if one was still
    /// waiting.
    pub fn cancel(&self) -> bool {
        let pending = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        pending.is_some_and(|handle| {
            let waiting = !handle.is_finished();
            handle.abort();
            waiting
        })
    }

    /// Returns `true` while a timer is waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for PressTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
