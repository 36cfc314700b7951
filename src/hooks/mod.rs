//! Entity-lifecycle integration surface.
//!
//! The persistence integration constructs one `EntityHook` per in-memory
//! entity instance and routes that entity's lifecycle callbacks through the
//! `Notifier`.

use crate::notification::{EntityRef, NotificationBuffer};

/// Capabilities of the persistence layer, resolved once at wiring time rather
/// than probed per call.
///
/// When `supports_post_commit_hook` is false the integration invokes
/// `Notifier::on_unit_of_work_committed` after save completion instead of
/// after durable commit; the core treats both signals identically.
#[derive(Debug, Clone, Copy)]
pub struct PersistenceCapabilities {
    pub supports_post_commit_hook: bool,
}

impl PersistenceCapabilities {
    /// Log which commit signal the integration will flush on.
    pub fn log_wiring(&self) {
        if self.supports_post_commit_hook {
            tracing::info!(hook = "post_commit", "Flushing notifications after durable commit");
        } else {
            tracing::info!(
                hook = "post_save",
                "Persistence layer lacks a post-commit hook, flushing after save"
            );
        }
    }
}

/// Per-entity-instance wiring: the entity's stable identity plus its owned
/// notification buffer.
///
/// The buffer is an explicit field created with the hook, never shared across
/// entity instances, and discarded with the hook. Not persisted.
#[derive(Debug)]
pub struct EntityHook {
    entity: EntityRef,
    buffer: NotificationBuffer,
}

impl EntityHook {
    pub fn new(entity: EntityRef) -> Self {
        Self {
            entity,
            buffer: NotificationBuffer::new(),
        }
    }

    pub fn entity(&self) -> &EntityRef {
        &self.entity
    }

    pub fn buffer(&self) -> &NotificationBuffer {
        &self.buffer
    }

    /// Number of notifications awaiting commit.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::PendingNotification;

    #[test]
    fn test_new_hook_has_empty_buffer() {
        let hook = EntityHook::new(EntityRef::new("User", "42"));
        assert_eq!(hook.pending(), 0);
        assert_eq!(hook.entity().to_string(), "User/42");
    }

    #[test]
    fn test_pending_tracks_buffer() {
        let hook = EntityHook::new(EntityRef::new("User", "42"));
        hook.buffer()
            .record(PendingNotification::new("confirmation_instructions", vec![]));
        assert_eq!(hook.pending(), 1);
    }

    #[test]
    fn test_log_wiring_smoke() {
        PersistenceCapabilities {
            supports_post_commit_hook: true,
        }
        .log_wiring();
        PersistenceCapabilities {
            supports_post_commit_hook: false,
        }
        .log_wiring();
    }
}
