//! Configuration channel errors.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum SettingsError {
    /// The transport to the configuration store failed (round trip lost,
    /// channel closed). Retryable.
    #[error("Settings transport failed: {0}")]
    Transport(String),

    /// The whole extension context was invalidated; the channel must be
    /// re-initialized before another attempt can succeed.
    #[error("Extension context invalidated")]
    ContextInvalidated,

    /// The store answered but holds no settings. Distinct from transport
    /// failure: retrying will not help.
    #[error("No settings stored")]
    NotFound,
}

impl SettingsError {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SettingsError::Transport(_) | SettingsError::ContextInvalidated
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_is_retryable() {
        assert!(SettingsError::Transport("lost".to_string()).is_retryable());
        assert!(SettingsError::ContextInvalidated.is_retryable());
        assert!(!SettingsError::NotFound.is_retryable());
    }

    #[test]
    fn test_display() {
        let err = SettingsError::Transport("port closed".to_string());
        assert!(err.to_string().contains("port closed"));
        assert!(SettingsError::ContextInvalidated.to_string().contains("invalidated"));
    }
}
