//! Message-rendering collaborator interface.

use async_trait::async_trait;

use crate::error::RenderError;
use crate::notification::{EntityRef, Message};

/// Capabilities of the mailer integration, resolved once at wiring time rather
/// than probed per call.
#[derive(Debug, Clone, Copy)]
pub struct MailerCapabilities {
    /// Whether rendered messages can be handed to an async execution facility
    pub supports_async_delivery: bool,
}

/// Renders a notification kind plus arguments into a deliverable message.
///
/// Implemented by the mail/template collaborator. Receives the entity's type
/// and id rather than the entity itself, so no live reference is held across
/// the async boundary; the renderer re-fetches any committed state it needs.
#[async_trait]
pub trait MessageRenderer: Send + Sync {
    async fn render(
        &self,
        kind: &str,
        entity: &EntityRef,
        args: &[serde_json::Value],
    ) -> Result<Message, RenderError>;
}
