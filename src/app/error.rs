use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum TootfetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Please enter a profile address")]
    MissingUrl,

    #[error("Invalid post count: {0} (must be a whole number of at least 1)")]
    InvalidCount(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, TootfetchError>;
