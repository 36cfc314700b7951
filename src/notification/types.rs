use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of the record a notification belongs to.
///
/// Carried across the async boundary instead of a live entity reference; the
/// renderer re-fetches whatever committed state it needs by type and id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    /// Type name of the entity (e.g. "User")
    pub entity_type: String,
    /// Stable identifier of the entity instance
    pub entity_id: String,
}

impl EntityRef {
    pub fn new(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.entity_type, self.entity_id)
    }
}

/// One deferred send request. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingNotification {
    /// Notification kind (e.g. "confirmation_instructions")
    pub kind: String,
    /// Arguments forwarded verbatim to the renderer at flush time
    pub args: Vec<serde_json::Value>,
    /// When the request was recorded
    pub requested_at: DateTime<Utc>,
}

impl PendingNotification {
    pub fn new(kind: impl Into<String>, args: Vec<serde_json::Value>) -> Self {
        Self {
            kind: kind.into(),
            args,
            requested_at: Utc::now(),
        }
    }
}

/// Rendered message handed to the delivery backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier for this message
    pub id: Uuid,
    /// Notification kind the message was rendered from
    pub kind: String,
    /// Entity the message is about
    pub entity: EntityRef,
    /// Rendered message content
    pub body: String,
    /// When rendering happened
    pub rendered_at: DateTime<Utc>,
}

impl Message {
    pub fn new(kind: impl Into<String>, entity: EntityRef, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: kind.into(),
            entity,
            body: body.into(),
            rendered_at: Utc::now(),
        }
    }
}

/// How a notification request was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Appended to the entity's buffer; delivered after commit
    Buffered,
    /// Rendered and handed to the delivery backend immediately
    Delivered,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_ref_display() {
        let entity = EntityRef::new("User", "42");
        assert_eq!(entity.to_string(), "User/42");
    }

    #[test]
    fn test_pending_notification() {
        let pending =
            PendingNotification::new("reset_password_instructions", vec![json!("token-123")]);
        assert_eq!(pending.kind, "reset_password_instructions");
        assert_eq!(pending.args, vec![json!("token-123")]);
    }

    #[test]
    fn test_message_ids_are_unique() {
        let entity = EntityRef::new("User", "1");
        let a = Message::new("confirmation_instructions", entity.clone(), "body");
        let b = Message::new("confirmation_instructions", entity, "body");
        assert_ne!(a.id, b.id);
    }
}
