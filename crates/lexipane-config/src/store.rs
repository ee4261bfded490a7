//! TOML-backed settings store.

use std::fs;
use std::path::{Path, PathBuf};

use lexipane_protocols::settings::ProviderSettings;

use crate::error::ConfigError;

/// Persisted settings store.
///
/// A missing file is not an error: it yields the defaults, the same way a
/// fresh synced store would.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings from disk, falling back to defaults when the file does
    /// not exist yet.
    pub fn load(&self) -> Result<ProviderSettings, ConfigError> {
        if !self.path.exists() {
            return Ok(ProviderSettings::default());
        }
        let content = fs::read_to_string(&self.path)?;
        Self::load_str(&content)
    }

    /// Parse settings from a TOML string.
    pub fn load_str(content: &str) -> Result<ProviderSettings, ConfigError> {
        let settings: ProviderSettings = toml::from_str(content)?;
        Ok(settings)
    }

    /// Write settings to disk, creating parent directories as needed.
    pub fn save(&self, settings: &ProviderSettings) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(settings)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexipane_protocols::settings::ProviderKind;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.toml"));
        let settings = store.load().unwrap();
        assert_eq!(settings, ProviderSettings::default());
    }

    #[test]
    fn test_load_str_defaults_from_empty() {
        let settings = SettingsStore::load_str("").unwrap();
        assert!(!settings.use_api);
        assert_eq!(settings.deepseek_model, "deepseek-chat");
    }

    #[test]
    fn test_load_str_full() {
        let content = r#"
            use_api = true
            use_free_api = false
            api_type = "deepseek"
            deepseek_api_key = "dk-test"
            deepseek_model = "deepseek-coder"
        "#;
        let settings = SettingsStore::load_str(content).unwrap();
        assert!(settings.use_api);
        assert_eq!(settings.api_type, ProviderKind::DeepSeek);
        assert_eq!(settings.deepseek_api_key, "dk-test");
        assert_eq!(settings.deepseek_model, "deepseek-coder");
        assert!(settings.provider_path_available());
    }

    #[test]
    fn test_load_str_invalid_toml() {
        assert!(SettingsStore::load_str("use_api = [unclosed").is_err());
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join("settings.toml"));

        let settings = ProviderSettings {
            use_api: true,
            api_type: ProviderKind::OpenAi,
            api_key: "sk-test".to_string(),
            ..Default::default()
        };
        store.save(&settings).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, settings);
    }
}
