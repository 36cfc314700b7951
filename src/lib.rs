// Infrastructure layer (shared components)
pub mod config;
pub mod error;
pub mod telemetry;

// Domain layer (business logic)
pub mod delivery;
pub mod hooks;
pub mod mailer;
pub mod notification;

pub use config::{DeliveryConfig, DeliverySettings, Settings};
pub use delivery::{
    create_delivery_backend, DeliveryBackend, InlineBackend, MessageTransport, TaskQueueBackend,
};
pub use error::{EnqueueError, NotifyError, RenderError, Result};
pub use hooks::{EntityHook, PersistenceCapabilities};
pub use mailer::{MailerCapabilities, MessageRenderer};
pub use notification::{
    DeliveryDecision, DeliveryOutcome, EntityRef, EntityState, FlushReport, Message, Notifier,
    NotificationBuffer, PendingNotification,
};
