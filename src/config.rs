use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Environment variable holding the generative API key. The key itself
    /// never lands in the config file.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
}

fn default_theme() -> String {
    "cyber-night".to_string()
}
fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}
fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}
fn default_request_timeout_secs() -> u64 {
    15
}
fn default_export_dir() -> String {
    dirs::download_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            request_timeout_secs: default_request_timeout_secs(),
            export_dir: default_export_dir(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fasn")
            .join("config.toml")
    }

    /// Reads the API key out of the configured environment variable; an
    /// unset or empty variable means the portal runs without a live tutor.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "cyber-night");
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.request_timeout_secs, 15);
        assert!(!config.export_dir.is_empty());
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config: Config = toml::from_str(
            r#"
theme = "paper-term"
model = "gemini-2.0-flash"
"#,
        )
        .unwrap();
        assert_eq!(config.theme, "paper-term");
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.request_timeout_secs, 15);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.theme, deserialized.theme);
        assert_eq!(config.model, deserialized.model);
        assert_eq!(config.export_dir, deserialized.export_dir);
    }

    #[test]
    fn api_key_missing_env_is_none() {
        let mut config = Config::default();
        config.api_key_env = "FASN_TEST_KEY_THAT_DOES_NOT_EXIST".to_string();
        assert!(config.api_key().is_none());
    }
}
