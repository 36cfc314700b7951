use thiserror::Error;

/// Error from the message-rendering collaborator.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unknown notification kind: {0}")]
    UnknownKind(String),

    #[error("Template error for '{kind}': {message}")]
    Template { kind: String, message: String },

    #[error("Render error: {0}")]
    Other(String),
}

/// Error from the delivery backend or its transport.
#[derive(Debug, Error)]
pub enum EnqueueError {
    #[error("Delivery queue is full (capacity: {capacity})")]
    QueueFull { capacity: usize },

    #[error("Delivery worker has shut down")]
    ChannelClosed,

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Top-level error type for notification operations.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Enqueue error: {0}")]
    Enqueue(#[from] EnqueueError),
}

pub type Result<T> = std::result::Result<T, NotifyError>;
