use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::config::DeliveryConfig;
use crate::delivery::DeliveryBackend;
use crate::error::{NotifyError, Result};
use crate::hooks::EntityHook;
use crate::mailer::MessageRenderer;

use super::policy::{decide, DeliveryDecision, EntityState};
use super::{DeliveryOutcome, EntityRef, PendingNotification};

/// Statistics for the notifier
#[derive(Debug, Default)]
pub struct NotifierStats {
    /// Requests deferred into a buffer
    pub buffered: AtomicU64,
    /// Requests delivered on the immediate path
    pub delivered_immediate: AtomicU64,
    /// Buffered entries delivered by commit flushes
    pub flushed: AtomicU64,
    /// Failed render attempts
    pub render_failures: AtomicU64,
    /// Failed enqueue attempts
    pub enqueue_failures: AtomicU64,
}

impl NotifierStats {
    pub fn snapshot(&self) -> NotifierStatsSnapshot {
        NotifierStatsSnapshot {
            buffered: self.buffered.load(Ordering::Relaxed),
            delivered_immediate: self.delivered_immediate.load(Ordering::Relaxed),
            flushed: self.flushed.load(Ordering::Relaxed),
            render_failures: self.render_failures.load(Ordering::Relaxed),
            enqueue_failures: self.enqueue_failures.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of notifier statistics
#[derive(Debug, Clone, Serialize)]
pub struct NotifierStatsSnapshot {
    pub buffered: u64,
    pub delivered_immediate: u64,
    pub flushed: u64,
    pub render_failures: u64,
    pub enqueue_failures: u64,
}

/// Accounting for one flush.
///
/// Failures carry the undelivered entry alongside its cause so callers can
/// report or re-submit it; the notifier itself never re-buffers a failed entry.
#[derive(Debug, Default)]
pub struct FlushReport {
    /// Entries rendered and handed to the delivery backend
    pub delivered: usize,
    /// Entries that failed to render or enqueue
    pub failures: Vec<(PendingNotification, NotifyError)>,
}

impl FlushReport {
    /// True when every drained entry was handed off.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Routes notification requests into the buffer-vs-immediate path and flushes
/// entity buffers when their unit of work commits.
pub struct Notifier {
    config: DeliveryConfig,
    renderer: Arc<dyn MessageRenderer>,
    backend: Arc<dyn DeliveryBackend>,
    stats: NotifierStats,
}

impl Notifier {
    pub fn new(
        config: DeliveryConfig,
        renderer: Arc<dyn MessageRenderer>,
        backend: Arc<dyn DeliveryBackend>,
    ) -> Self {
        Self {
            config,
            renderer,
            backend,
            stats: NotifierStats::default(),
        }
    }

    /// Whether commit-deferred buffering is enabled.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Get notifier statistics
    pub fn stats(&self) -> NotifierStatsSnapshot {
        self.stats.snapshot()
    }

    /// Handle a notification request raised during an entity lifecycle event.
    ///
    /// A new record or one with uncommitted changes defers into the hook's
    /// buffer; anything else (including buffering disabled) renders and
    /// delivers right away.
    #[tracing::instrument(
        name = "notifier.request",
        skip(self, hook, args),
        fields(entity = %hook.entity(), kind = %kind)
    )]
    pub async fn on_notification_requested(
        &self,
        hook: &EntityHook,
        state: EntityState,
        kind: &str,
        args: Vec<serde_json::Value>,
    ) -> Result<DeliveryOutcome> {
        if kind.is_empty() {
            return Err(NotifyError::Validation(
                "notification kind must not be empty".to_string(),
            ));
        }

        match decide(self.config.enabled, state) {
            DeliveryDecision::Defer => {
                hook.buffer().record(PendingNotification::new(kind, args));
                self.stats.buffered.fetch_add(1, Ordering::Relaxed);
                Ok(DeliveryOutcome::Buffered)
            }
            DeliveryDecision::Immediate => {
                self.render_and_deliver(hook.entity(), kind, &args).await?;
                self.stats.delivered_immediate.fetch_add(1, Ordering::Relaxed);

                tracing::debug!("Notification delivered immediately");

                Ok(DeliveryOutcome::Delivered)
            }
        }
    }

    /// Flush the entity's buffer after its unit of work has durably committed.
    ///
    /// Entries are drained first, then delivered in insertion order. Draining
    /// clears the buffer before any delivery happens, so a duplicate commit
    /// signal finds an empty buffer and delivers nothing. A failing entry is
    /// recorded in the report and the remaining entries are still attempted;
    /// failures never propagate in a way that could disturb the committed
    /// unit of work.
    #[tracing::instrument(
        name = "notifier.commit",
        skip(self, hook),
        fields(entity = %hook.entity())
    )]
    pub async fn on_unit_of_work_committed(&self, hook: &EntityHook) -> FlushReport {
        let entries = hook.buffer().drain();
        if entries.is_empty() {
            return FlushReport::default();
        }

        let total = entries.len();
        let mut report = FlushReport::default();

        for entry in entries {
            match self
                .render_and_deliver(hook.entity(), &entry.kind, &entry.args)
                .await
            {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    tracing::warn!(
                        kind = %entry.kind,
                        error = %e,
                        "Buffered notification failed during flush"
                    );
                    report.failures.push((entry, e));
                }
            }
        }

        self.stats
            .flushed
            .fetch_add(report.delivered as u64, Ordering::Relaxed);

        tracing::debug!(
            total = total,
            delivered = report.delivered,
            failed = report.failures.len(),
            "Flushed pending notifications"
        );

        report
    }

    /// Immediate path: render the message and hand it to the delivery backend.
    pub async fn render_and_deliver(
        &self,
        entity: &EntityRef,
        kind: &str,
        args: &[serde_json::Value],
    ) -> Result<()> {
        let message = match self.renderer.render(kind, entity, args).await {
            Ok(message) => message,
            Err(e) => {
                self.stats.render_failures.fetch_add(1, Ordering::Relaxed);
                return Err(e.into());
            }
        };

        if let Err(e) = self.backend.enqueue(message).await {
            self.stats.enqueue_failures.fetch_add(1, Ordering::Relaxed);
            return Err(e.into());
        }

        Ok(())
    }
}
