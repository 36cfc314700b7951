//! Delivery backends for rendered messages.
//!
//! A backend accepts rendered messages and executes the send, either on a
//! background task (`TaskQueueBackend`) or synchronously on the caller's task
//! (`InlineBackend`). The actual transport is an external collaborator.

mod backend;
mod factory;
mod inline_backend;
mod task_backend;

pub use backend::{DeliveryBackend, MessageTransport};
pub use factory::create_delivery_backend;
pub use inline_backend::InlineBackend;
pub use task_backend::TaskQueueBackend;
