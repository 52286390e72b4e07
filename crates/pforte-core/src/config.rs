//! TOML-based client configuration.
//!
//! Stores the portal endpoint and the SMTP relay settings:
//! - Portal base URL and request timeout
//! - SMTP host, port, STARTTLS flag and sender address
//!
//! Configuration is stored at `~/.config/pforte/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

fn default_base_url() -> String {
    "https://portal.schule.example".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_smtp_host() -> String {
    "mail.schule.example".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_true() -> bool {
    true
}

/// SMTP relay configuration for outbound mail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// Use STARTTLS (port 587 style). When false, implicit TLS is used.
    #[serde(default = "default_true")]
    pub starttls: bool,
    /// Sender address. Defaults to `<login>@<smtp host>` when unset.
    #[serde(default)]
    pub from_address: Option<String>,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            starttls: true,
            from_address: None,
        }
    }
}

/// Client configuration.
///
/// Serialized to/from TOML at `~/.config/pforte/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Portal root, e.g. `https://portal.schule.example`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub smtp: SmtpConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            smtp: SmtpConfig::default(),
        }
    }
}

impl Config {
    /// Path of the config file: `~/.config/pforte/config.toml`.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("pforte").join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when the file does
    /// not exist yet.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Persist the configuration, creating the parent directory if needed.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Save to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let render = |e: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| render(e.to_string()))?;
        }
        let raw = toml::to_string_pretty(self).map_err(|e| render(e.to_string()))?;
        std::fs::write(path, raw).map_err(|e| render(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.base_url, "https://portal.schule.example");
        assert_eq!(config.smtp.port, 587);
        assert!(config.smtp.starttls);
    }

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.base_url = "https://portal.gymnasium-nord.example".to_string();
        config.smtp.from_address = Some("noreply@gymnasium-nord.example".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.base_url, "https://portal.gymnasium-nord.example");
        assert_eq!(
            loaded.smtp.from_address.as_deref(),
            Some("noreply@gymnasium-nord.example")
        );
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = \"https://p.example\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_url, "https://p.example");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.smtp.host, "mail.schule.example");
    }
}
