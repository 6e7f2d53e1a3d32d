//! Error handling for the resume portal

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Resume service returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Could not open browser: {0}")]
    Browser(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),

    #[error("{0}")]
    ActionFailed(String),
}

pub type Result<T> = std::result::Result<T, PortalError>;

/// Transport failures from the HTTP client
impl From<reqwest::Error> for PortalError {
    fn from(err: reqwest::Error) -> Self {
        PortalError::Network(err.to_string())
    }
}

impl From<toml::de::Error> for PortalError {
    fn from(err: toml::de::Error) -> Self {
        PortalError::Configuration(format!("Failed to parse config: {}", err))
    }
}
