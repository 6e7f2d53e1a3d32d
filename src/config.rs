//! Configuration management for the resume portal

use crate::error::{PortalError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable that overrides `service.base_url`
pub const BASE_URL_ENV: &str = "RESUME_PORTAL_BASE_URL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub service: ServiceConfig,
    pub notifications: NotificationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceConfig {
    /// Root of the remote resume service; `/submit`, `/search` and
    /// `/resume/{id}` are resolved against it.
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationConfig {
    pub auto_close_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub show_spinner: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OutputFormat {
    Console,
    Json,
    Html,
}

impl FromStr for OutputFormat {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "console" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            _ => Err(PortalError::InvalidInput(format!(
                "Invalid output format: {}. Supported: console, json, html",
                s
            ))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                base_url: "http://127.0.0.1:5000".to_string(),
            },
            notifications: NotificationConfig {
                auto_close_ms: 3000,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                show_spinner: true,
            },
        }
    }
}

impl Config {
    /// Load from `path`, creating it with defaults on first use.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            let config = Self::default();
            config.save_to(path)?;
            config
        };

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                log::debug!("Using base URL from {}", BASE_URL_ENV);
                config.service.base_url = base_url;
            }
        }

        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| PortalError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-portal")
            .join("config.toml")
    }

    /// Set a value by dotted key, e.g. `service.base_url`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "service.base_url" => {
                reqwest::Url::parse(value)
                    .map_err(|e| PortalError::InvalidInput(format!("Invalid base URL '{}': {}", value, e)))?;
                self.service.base_url = value.to_string();
            }
            "notifications.auto_close_ms" => {
                self.notifications.auto_close_ms = parse_value(key, value)?;
            }
            "output.format" => {
                self.output.format = value.parse()?;
            }
            "output.color_output" => {
                self.output.color_output = parse_value(key, value)?;
            }
            "output.show_spinner" => {
                self.output.show_spinner = parse_value(key, value)?;
            }
            _ => {
                return Err(PortalError::InvalidInput(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| PortalError::InvalidInput(format!("Invalid value for {}: {}", key, value)))
}
