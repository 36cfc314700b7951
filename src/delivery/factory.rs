//! Delivery backend factory

use std::sync::Arc;

use crate::config::DeliverySettings;
use crate::mailer::MailerCapabilities;

use super::backend::{DeliveryBackend, MessageTransport};
use super::inline_backend::InlineBackend;
use super::task_backend::TaskQueueBackend;

/// Create a delivery backend from settings and the mailer's declared
/// capabilities.
///
/// Returns the appropriate backend implementation based on the `backend`
/// setting:
/// - `"task"`: a `TaskQueueBackend`, provided the mailer supports async
///   delivery; otherwise falls back to inline sends
/// - `"inline"` (and anything unrecognized): an `InlineBackend`
///
/// Capabilities are resolved here, once, at wiring time.
pub fn create_delivery_backend(
    settings: &DeliverySettings,
    capabilities: MailerCapabilities,
    transport: Arc<dyn MessageTransport>,
) -> Arc<dyn DeliveryBackend> {
    match settings.backend.as_str() {
        "task" if capabilities.supports_async_delivery => {
            tracing::info!(
                backend = "task",
                capacity = settings.queue_capacity,
                "Creating task-queue delivery backend"
            );
            Arc::new(TaskQueueBackend::new(settings.queue_capacity, transport))
        }
        "task" => {
            tracing::warn!(
                backend = "inline",
                "Mailer does not support async delivery, falling back to inline sends"
            );
            Arc::new(InlineBackend::new(transport))
        }
        "inline" => {
            tracing::info!(backend = "inline", "Creating inline delivery backend");
            Arc::new(InlineBackend::new(transport))
        }
        other => {
            tracing::warn!(
                backend = %other,
                "Unknown delivery backend, using inline sends"
            );
            Arc::new(InlineBackend::new(transport))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnqueueError;
    use crate::notification::Message;
    use async_trait::async_trait;

    struct NullTransport;

    #[async_trait]
    impl MessageTransport for NullTransport {
        async fn send(&self, _message: &Message) -> Result<(), EnqueueError> {
            Ok(())
        }
    }

    fn settings(backend: &str) -> DeliverySettings {
        DeliverySettings {
            backend: backend.to_string(),
            ..Default::default()
        }
    }

    const ASYNC_MAILER: MailerCapabilities = MailerCapabilities {
        supports_async_delivery: true,
    };

    const SYNC_MAILER: MailerCapabilities = MailerCapabilities {
        supports_async_delivery: false,
    };

    #[tokio::test]
    async fn test_task_backend_selected() {
        let backend = create_delivery_backend(&settings("task"), ASYNC_MAILER, Arc::new(NullTransport));
        assert!(backend.is_async());
    }

    #[tokio::test]
    async fn test_falls_back_to_inline_without_async_support() {
        let backend = create_delivery_backend(&settings("task"), SYNC_MAILER, Arc::new(NullTransport));
        assert!(!backend.is_async());
    }

    #[tokio::test]
    async fn test_inline_backend_selected() {
        let backend = create_delivery_backend(&settings("inline"), ASYNC_MAILER, Arc::new(NullTransport));
        assert!(!backend.is_async());
    }

    #[tokio::test]
    async fn test_unknown_backend_defaults_to_inline() {
        let backend = create_delivery_backend(&settings("carrier-pigeon"), ASYNC_MAILER, Arc::new(NullTransport));
        assert!(!backend.is_async());
    }
}
