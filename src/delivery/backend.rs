//! Delivery backend and transport traits.

use async_trait::async_trait;

use crate::error::EnqueueError;
use crate::notification::Message;

/// Hands rendered messages to an execution path.
///
/// An accepted message is considered handed off; retry of failed sends is the
/// transport's concern, never this trait's. Backends must preserve acceptance
/// order when executing sends.
#[async_trait]
pub trait DeliveryBackend: Send + Sync {
    /// True when messages are executed on a background task rather than inline.
    fn is_async(&self) -> bool;

    /// Accept a message for delivery.
    async fn enqueue(&self, message: Message) -> Result<(), EnqueueError>;
}

/// Transport that actually sends a rendered message (SMTP client, webhook, ...).
///
/// External collaborator; its own retry and rate-limiting policies are outside
/// this crate.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    async fn send(&self, message: &Message) -> Result<(), EnqueueError>;
}
