//! # Lexipane Config
//!
//! Persisted provider settings and the configuration channel the session
//! controller consumes: a TOML-backed store (the local analogue of the
//! browser's synced key-value store), the [`SettingsChannel`] trait at the
//! interface boundary, and a bounded-retry [`SettingsClient`].

mod channel;
mod error;
mod store;

pub use channel::{SettingsChannel, SettingsClient, SettingsRetryConfig, StoreSettingsChannel};
pub use error::ConfigError;
pub use store::SettingsStore;
