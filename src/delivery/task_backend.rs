//! Background-task delivery backend.
//!
//! Messages are pushed onto a bounded channel and sent by a spawned worker
//! task in acceptance order. Enqueue never blocks the caller: a full queue is
//! surfaced as an error instead of applying backpressure inside the commit
//! path.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::EnqueueError;
use crate::notification::Message;

use super::backend::{DeliveryBackend, MessageTransport};

/// Delivery backend backed by a tokio worker task.
///
/// Transport failures inside the worker are logged and the message is dropped;
/// retry is the transport's job. Must be constructed inside a tokio runtime.
pub struct TaskQueueBackend {
    /// Taken by `shutdown` to close the channel
    sender: Mutex<Option<mpsc::Sender<Message>>>,
    /// Worker task handle, awaited on shutdown
    worker: Mutex<Option<JoinHandle<()>>>,
    capacity: usize,
}

impl TaskQueueBackend {
    /// Spawn the worker and return the backend.
    ///
    /// A capacity of zero is clamped to one; `mpsc::channel` panics on zero.
    pub fn new(capacity: usize, transport: Arc<dyn MessageTransport>) -> Self {
        let capacity = capacity.max(1);
        let (tx, mut rx) = mpsc::channel::<Message>(capacity);

        let worker = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                if let Err(e) = transport.send(&message).await {
                    tracing::error!(
                        message_id = %message.id,
                        kind = %message.kind,
                        entity = %message.entity,
                        error = %e,
                        "Delivery transport failed"
                    );
                }
            }
            tracing::debug!("Delivery worker drained and stopped");
        });

        Self {
            sender: Mutex::new(Some(tx)),
            worker: Mutex::new(Some(worker)),
            capacity,
        }
    }

    /// Stop accepting messages, drain what is already queued, and wait for the
    /// worker to exit.
    pub async fn shutdown(&self) {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        drop(sender);

        let worker = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(worker) = worker {
            if let Err(e) = worker.await {
                tracing::warn!(error = %e, "Delivery worker task panicked");
            }
        }
    }

    fn sender(&self) -> Option<mpsc::Sender<Message>> {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl DeliveryBackend for TaskQueueBackend {
    fn is_async(&self) -> bool {
        true
    }

    async fn enqueue(&self, message: Message) -> Result<(), EnqueueError> {
        let Some(sender) = self.sender() else {
            return Err(EnqueueError::ChannelClosed);
        };

        match sender.try_send(message) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(message)) => {
                tracing::warn!(
                    message_id = %message.id,
                    kind = %message.kind,
                    capacity = self.capacity,
                    "Delivery queue full, message rejected"
                );
                Err(EnqueueError::QueueFull {
                    capacity: self.capacity,
                })
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Err(EnqueueError::ChannelClosed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::EntityRef;
    use tokio::sync::{Notify, Semaphore};

    fn test_message(kind: &str) -> Message {
        Message::new(kind, EntityRef::new("User", "1"), "body")
    }

    struct RecordingTransport {
        sent: Mutex<Vec<Message>>,
    }

    impl RecordingTransport {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent_kinds(&self) -> Vec<String> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .map(|m| m.kind.clone())
                .collect()
        }
    }

    #[async_trait]
    impl MessageTransport for RecordingTransport {
        async fn send(&self, message: &Message) -> Result<(), EnqueueError> {
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    /// Transport that signals when a send starts and holds it until a release
    /// permit is granted.
    struct GatedTransport {
        inner: RecordingTransport,
        entered: Notify,
        release: Semaphore,
    }

    impl GatedTransport {
        fn new() -> Self {
            Self {
                inner: RecordingTransport::new(),
                entered: Notify::new(),
                release: Semaphore::new(0),
            }
        }
    }

    #[async_trait]
    impl MessageTransport for GatedTransport {
        async fn send(&self, message: &Message) -> Result<(), EnqueueError> {
            self.entered.notify_one();
            if let Ok(permit) = self.release.acquire().await {
                permit.forget();
            }
            self.inner.send(message).await
        }
    }

    #[tokio::test]
    async fn test_delivers_in_order() {
        let transport = Arc::new(RecordingTransport::new());
        let backend = TaskQueueBackend::new(8, transport.clone());

        backend.enqueue(test_message("confirmation_instructions")).await.unwrap();
        backend.enqueue(test_message("reset_password_instructions")).await.unwrap();
        backend.enqueue(test_message("unlock_instructions")).await.unwrap();

        backend.shutdown().await;

        assert_eq!(
            transport.sent_kinds(),
            vec![
                "confirmation_instructions",
                "reset_password_instructions",
                "unlock_instructions"
            ]
        );
    }

    #[tokio::test]
    async fn test_enqueue_fails_when_queue_full() {
        let transport = Arc::new(GatedTransport::new());
        let backend = TaskQueueBackend::new(1, transport.clone());

        // Worker picks up the first message and blocks inside the transport.
        backend.enqueue(test_message("first")).await.unwrap();
        transport.entered.notified().await;

        // Second fills the channel, third must be rejected.
        backend.enqueue(test_message("second")).await.unwrap();
        let err = backend.enqueue(test_message("third")).await.unwrap_err();
        assert!(matches!(err, EnqueueError::QueueFull { capacity: 1 }));

        // Release both held sends and drain.
        transport.release.add_permits(2);
        backend.shutdown().await;

        assert_eq!(transport.inner.sent_kinds(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_zero_capacity_is_clamped() {
        let transport = Arc::new(RecordingTransport::new());
        let backend = TaskQueueBackend::new(0, transport.clone());

        backend.enqueue(test_message("confirmation_instructions")).await.unwrap();
        backend.shutdown().await;

        assert_eq!(transport.sent_kinds(), vec!["confirmation_instructions"]);
    }

    #[tokio::test]
    async fn test_enqueue_after_shutdown() {
        let transport = Arc::new(RecordingTransport::new());
        let backend = TaskQueueBackend::new(8, transport);

        backend.shutdown().await;

        let err = backend.enqueue(test_message("late")).await.unwrap_err();
        assert!(matches!(err, EnqueueError::ChannelClosed));
    }

    #[tokio::test]
    async fn test_shutdown_drains_pending_messages() {
        let transport = Arc::new(RecordingTransport::new());
        let backend = TaskQueueBackend::new(16, transport.clone());

        for i in 0..10 {
            backend.enqueue(test_message(&format!("kind-{i}"))).await.unwrap();
        }

        backend.shutdown().await;

        assert_eq!(transport.sent_kinds().len(), 10);
    }
}
