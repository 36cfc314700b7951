//! Per-entity buffer of pending notifications.
//!
//! Accumulates send requests raised during an in-progress unit of work and
//! releases them exactly once when that unit of work commits.

use std::mem;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::PendingNotification;

/// Ordered buffer of notifications awaiting commit.
///
/// Owned by exactly one entity wrapper; insertion order is send order. `drain`
/// takes the entries and clears the buffer in a single step under the lock, so
/// a duplicate commit signal that drains again observes an empty buffer and
/// delivers nothing. There is no window where two drains both see a non-empty
/// buffer.
#[derive(Debug, Default)]
pub struct NotificationBuffer {
    entries: Mutex<Vec<PendingNotification>>,
}

impl NotificationBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a notification. No side effects beyond the buffer itself.
    pub fn record(&self, notification: PendingNotification) {
        let mut entries = self.lock();
        tracing::debug!(
            kind = %notification.kind,
            pending = entries.len() + 1,
            "Notification buffered until commit"
        );
        entries.push(notification);
    }

    /// Take all buffered entries, leaving the buffer empty.
    ///
    /// Safe on an empty buffer (returns an empty vec).
    pub fn drain(&self) -> Vec<PendingNotification> {
        mem::take(&mut *self.lock())
    }

    /// Number of entries awaiting commit.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A poisoned lock only means a panic elsewhere mid-push; the Vec itself is
    // still coherent, so recover the guard rather than propagating the panic.
    fn lock(&self) -> MutexGuard<'_, Vec<PendingNotification>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
