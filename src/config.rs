use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::client::DEFAULT_SERVER_URL;
use crate::controller::{AlertMessages, EXAMPLE_FAILED_MESSAGE, UPLOAD_FAILED_MESSAGE};
use crate::render::{RenderOptions, DEFAULT_CURRENCY_SYMBOL};

/// Example items the reference backend ships with.
pub const DEFAULT_EXAMPLES: &[&str] = &[
    "jacket", "shirt", "jeans", "shoes", "boots", "pants", "suit", "jumper",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    Read(#[from] std::io::Error),
    #[error("{0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub render: RenderConfig,
    pub messages: MessagesConfig,
    /// Informational list of example identifiers; the client never rejects others.
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub url: String,
    /// Unset means requests wait for the server indefinitely.
    #[serde(with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVER_URL.to_string(),
            timeout: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub currency_symbol: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    pub example_failed: String,
    pub upload_failed: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            example_failed: EXAMPLE_FAILED_MESSAGE.to_string(),
            upload_failed: UPLOAD_FAILED_MESSAGE.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            render: RenderConfig::default(),
            messages: MessagesConfig::default(),
            examples: DEFAULT_EXAMPLES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Explicit path, else the central config file if it exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::central_config_path() {
            Some(central) if central.is_file() => Self::from_file(&central),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// `~/.config/prelovium/config.toml` (platform config dir).
    pub fn central_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("prelovium").join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.server.url)
            .map_err(|e| format!("server.url '{}' is not a valid URL: {}", self.server.url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "server.url must use http or https, got '{}'",
                self.server.url
            ));
        }
        if self.server.timeout == Some(Duration::ZERO) {
            return Err("server.timeout must be greater than zero".to_string());
        }
        if self.messages.example_failed.trim().is_empty()
            || self.messages.upload_failed.trim().is_empty()
        {
            return Err("messages must not be empty".to_string());
        }
        Ok(())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            currency_symbol: self.render.currency_symbol.clone(),
        }
    }

    pub fn alert_messages(&self) -> AlertMessages {
        AlertMessages {
            example_failed: self.messages.example_failed.clone(),
            upload_failed: self.messages.upload_failed.clone(),
        }
    }

    pub fn is_known_example(&self, example: &str) -> bool {
        self.examples.iter().any(|e| e == example)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn default_values_match_expected() {
        let cfg = Config::default();

        assert_eq!(cfg.server.url, "http://localhost:8080");
        assert!(cfg.server.timeout.is_none());
        assert_eq!(cfg.render.currency_symbol, "€");
        assert_eq!(cfg.messages.example_failed, EXAMPLE_FAILED_MESSAGE);
        assert_eq!(cfg.examples.len(), 8);
        assert!(cfg.is_known_example("jacket"));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg = Config::from_toml(
            r#"
            examples = ["chair1"]

            [server]
            url = "https://prelovium.example"
            timeout = "90s"

            [render]
            currency_symbol = "£"
            "#,
        )
        .expect("parse config");

        assert_eq!(cfg.server.url, "https://prelovium.example");
        assert_eq!(cfg.server.timeout, Some(Duration::from_secs(90)));
        assert_eq!(cfg.render_options().currency_symbol, "£");
        assert_eq!(cfg.alert_messages(), AlertMessages::default());
        assert_eq!(cfg.examples, vec!["chair1".to_string()]);
    }

    #[test]
    fn load_reads_explicit_path() {
        let file = NamedTempFile::new().expect("temp file");
        std::fs::write(file.path(), "[messages]\nupload_failed = \"Nope\"\n").unwrap();

        let cfg = Config::load(Some(file.path())).expect("load");
        assert_eq!(cfg.messages.upload_failed, "Nope");
        assert_eq!(cfg.messages.example_failed, EXAMPLE_FAILED_MESSAGE);
    }

    #[test]
    fn load_reports_missing_explicit_path() {
        let result = Config::load(Some(Path::new("/nonexistent/prelovium.toml")));
        assert!(matches!(result, Err(ConfigError::Read(_))));
    }

    #[test]
    fn validate_rejects_bad_server_urls_and_zero_timeout() {
        let mut cfg = Config::default();
        cfg.server.url = "ftp://files.example".into();
        assert!(cfg.validate().unwrap_err().contains("http or https"));

        cfg.server.url = "not a url".into();
        assert!(cfg.validate().unwrap_err().contains("not a valid URL"));

        cfg.server.url = DEFAULT_SERVER_URL.into();
        cfg.server.timeout = Some(Duration::ZERO);
        assert!(cfg.validate().is_err());
    }
}
