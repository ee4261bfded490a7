//! Provider settings.
//!
//! Loaded once per explanation session from the persisted configuration
//! store and read-only for the rest of the session. The serialized key
//! names match the synced key-value schema the settings UI writes.

use serde::{Deserialize, Serialize};

/// Which paid provider the user selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    #[default]
    DeepSeek,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::DeepSeek => "deepseek",
        }
    }
}

/// Persisted provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default)]
    pub use_api: bool,

    #[serde(default)]
    pub use_free_api: bool,

    #[serde(default)]
    pub api_type: ProviderKind,

    #[serde(default)]
    pub api_key: String,

    #[serde(default)]
    pub deepseek_api_key: String,

    #[serde(default = "default_deepseek_model")]
    pub deepseek_model: String,
}

fn default_deepseek_model() -> String {
    "deepseek-chat".to_string()
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            use_api: false,
            use_free_api: false,
            api_type: ProviderKind::DeepSeek,
            api_key: String::new(),
            deepseek_api_key: String::new(),
            deepseek_model: default_deepseek_model(),
        }
    }
}

impl ProviderSettings {
    /// Credential for the selected provider kind, if one is configured.
    pub fn credential(&self) -> Option<&str> {
        let key = match self.api_type {
            ProviderKind::OpenAi => self.api_key.as_str(),
            ProviderKind::DeepSeek => self.deepseek_api_key.as_str(),
        };
        if key.is_empty() { None } else { Some(key) }
    }

    /// Whether the provider path is taken at all.
    ///
    /// API use must be enabled, and either the free tier is selected or a
    /// non-empty credential exists for the selected provider kind.
    /// Otherwise the session uses the local stub unconditionally.
    pub fn provider_path_available(&self) -> bool {
        self.use_api && (self.use_free_api || self.credential().is_some())
    }
}
