//! Configuration channel and bounded-retry client.
//!
//! The settings round trip crosses a transport the engine does not own, so
//! it can fail transiently or report that the whole extension context was
//! invalidated. The client retries a fixed number of times with a growing
//! backoff and re-initializes the channel on invalidation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{debug, warn};

use lexipane_protocols::error::SettingsError;
use lexipane_protocols::settings::ProviderSettings;

use crate::store::SettingsStore;

/// Boundary to the persisted configuration store.
#[async_trait]
pub trait SettingsChannel: Send + Sync {
    /// One settings round trip.
    async fn get_api_settings(&self) -> Result<ProviderSettings, SettingsError>;

    /// Rebuild the transport after a context invalidation.
    async fn reinitialize(&self) -> Result<(), SettingsError>;
}

/// Retry configuration for settings lookups.
#[derive(Debug, Clone)]
pub struct SettingsRetryConfig {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub base_delay: Duration,
    /// Growth factor applied per retry.
    pub backoff_multiplier: f64,
}

impl Default for SettingsRetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
            backoff_multiplier: 1.5,
        }
    }
}

impl SettingsRetryConfig {
    /// Delay before retry `attempt` (0-based): `base * multiplier^attempt`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self.base_delay.as_millis() as f64
            * self.backoff_multiplier.powi(attempt as i32);
        Duration::from_millis(delay as u64)
    }
}

/// Settings lookup client with bounded retry.
pub struct SettingsClient {
    channel: Arc<dyn SettingsChannel>,
    config: SettingsRetryConfig,
}

impl SettingsClient {
    pub fn new(channel: Arc<dyn SettingsChannel>, config: SettingsRetryConfig) -> Self {
        Self { channel, config }
    }

    /// Fetch settings, retrying transient failures up to the configured
    /// attempt budget. A context invalidation triggers channel
    /// re-initialization before the next attempt and still consumes one
    /// attempt. Non-retryable failures surface immediately.
    pub async fn fetch(&self) -> Result<ProviderSettings, SettingsError> {
        let mut last_error = None;

        for attempt in 0..self.config.max_attempts {
            match self.channel.get_api_settings().await {
                Ok(settings) => {
                    debug!("Settings lookup succeeded on attempt {}", attempt + 1);
                    return Ok(settings);
                }
                Err(e) => {
                    if !e.is_retryable() {
                        return Err(e);
                    }

                    if matches!(e, SettingsError::ContextInvalidated) {
                        warn!("Settings context invalidated, re-initializing channel");
                        if let Err(init_err) = self.channel.reinitialize().await {
                            warn!("Channel re-initialization failed: {}", init_err);
                        }
                    }

                    warn!(
                        "Settings lookup failed (attempt {}/{}): {}",
                        attempt + 1,
                        self.config.max_attempts,
                        e
                    );
                    last_error = Some(e);

                    if attempt + 1 < self.config.max_attempts {
                        sleep(self.config.delay_for_attempt(attempt)).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or(SettingsError::NotFound))
    }
}

/// Channel implementation backed by the local TOML store.
pub struct StoreSettingsChannel {
    store: SettingsStore,
}

impl StoreSettingsChannel {
    pub fn new(store: SettingsStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SettingsChannel for StoreSettingsChannel {
    async fn get_api_settings(&self) -> Result<ProviderSettings, SettingsError> {
        self.store
            .load()
            .map_err(|e| SettingsError::Transport(e.to_string()))
    }

    async fn reinitialize(&self) -> Result<(), SettingsError> {
        // The file-backed store holds no transport state to rebuild.
        Ok(())
    }
}
