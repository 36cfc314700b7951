//! Synchronous send fallback.
//!
//! Used when the mailer integration cannot hand messages to a background
//! execution facility: the send completes on the caller's task before
//! `enqueue` returns.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::EnqueueError;
use crate::notification::Message;

use super::backend::{DeliveryBackend, MessageTransport};

/// Delivery backend that sends through the transport inline.
pub struct InlineBackend {
    transport: Arc<dyn MessageTransport>,
}

impl InlineBackend {
    pub fn new(transport: Arc<dyn MessageTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl DeliveryBackend for InlineBackend {
    fn is_async(&self) -> bool {
        false
    }

    async fn enqueue(&self, message: Message) -> Result<(), EnqueueError> {
        self.transport.send(&message).await?;

        tracing::debug!(
            message_id = %message.id,
            kind = %message.kind,
            entity = %message.entity,
            "Message sent inline"
        );

        Ok(())
    }
}
