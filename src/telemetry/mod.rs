//! Tracing setup.
//!
//! Library code only emits `tracing` events; installing a subscriber is the
//! embedding application's choice. This helper wires up console output with
//! `RUST_LOG`-style filtering for applications that want a default.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber with console output.
///
/// Filtering comes from the default env filter (`RUST_LOG`), falling back to
/// `info`. Calling this more than once is a no-op, so tests can call it
/// freely.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
