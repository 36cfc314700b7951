mod settings;

pub use settings::{DeliveryConfig, DeliverySettings, Settings};
