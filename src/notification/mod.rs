//! Commit-deferred notification domain.
//!
//! Pending-notification types, the per-entity buffer, the defer-vs-immediate
//! policy, and the notifier that ties them to the renderer and delivery backend.

mod buffer;
mod notifier;
mod policy;
mod types;

pub use buffer::NotificationBuffer;
pub use notifier::{FlushReport, Notifier, NotifierStats, NotifierStatsSnapshot};
pub use policy::{decide, DeliveryDecision, EntityState};
pub use types::{DeliveryOutcome, EntityRef, Message, PendingNotification};
