use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Buffering configuration injected into the `Notifier` at construction time.
///
/// A plain value rather than a process-wide flag, so several notifiers with
/// differing behavior can coexist in one process (tests in particular).
#[derive(Debug, Clone, Copy)]
pub struct DeliveryConfig {
    /// When false, every notification request is rendered and sent immediately
    /// and the buffer is never touched.
    pub enabled: bool,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub delivery: DeliverySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeliverySettings {
    /// Whether notifications are buffered until the unit of work commits
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Delivery backend: "task" (background worker) or "inline"
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Bounded capacity of the task backend's queue
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_enabled() -> bool {
    true
}

fn default_backend() -> String {
    "task".to_string()
}

fn default_queue_capacity() -> usize {
    1024
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            // Start with default values
            .set_default("delivery.enabled", true)?
            .set_default("delivery.backend", "task")?
            .set_default("delivery.queue_capacity", 1024)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables
            // DELIVERY__ENABLED, DELIVERY__BACKEND, DELIVERY__QUEUE_CAPACITY
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(","),
            );

        builder.build()?.try_deserialize()
    }
}

impl DeliverySettings {
    /// The construction-time value handed to the notifier.
    pub fn delivery_config(&self) -> DeliveryConfig {
        DeliveryConfig {
            enabled: self.enabled,
        }
    }
}

impl Default for DeliverySettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            backend: default_backend(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let delivery = DeliverySettings::default();
        assert!(delivery.enabled);
        assert_eq!(delivery.backend, "task");
        assert_eq!(delivery.queue_capacity, 1024);
    }

    #[test]
    fn test_delivery_config_from_settings() {
        let delivery = DeliverySettings {
            enabled: false,
            ..Default::default()
        };
        assert!(!delivery.delivery_config().enabled);
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("DELIVERY__ENABLED", "false");
        std::env::set_var("DELIVERY__QUEUE_CAPACITY", "7");

        let settings = Settings::new().unwrap();
        assert!(!settings.delivery.enabled);
        assert_eq!(settings.delivery.queue_capacity, 7);

        std::env::remove_var("DELIVERY__ENABLED");
        std::env::remove_var("DELIVERY__QUEUE_CAPACITY");
    }
}
