//! Configuration management for tootfetch.
//!
//! Configuration is read from `~/.config/tootfetch/config.toml` at startup
//! (or the path given with `--config`). If the file doesn't exist, a default
//! configuration with comments is created.

use crate::browser::SessionConfig;
use crate::fetcher::paginator::DEFAULT_CURSOR_PARAM;
use crate::observer::DEFAULT_LISTING_MARKER;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_POST_COUNT: usize = 100;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub browser: SessionConfig,
    pub fetch: FetchConfig,
    pub export: ExportConfig,
}

/// How listing pages are recognised and followed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Number of posts requested when none is given (default: 100)
    pub default_count: usize,

    /// URL fragment identifying the listing endpoint
    pub listing_marker: String,

    /// Query parameter carrying the "older than" cursor
    pub cursor_param: String,

    /// Timeout for direct page requests in seconds (default: none)
    pub request_timeout_secs: Option<u64>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            default_count: DEFAULT_POST_COUNT,
            listing_marker: DEFAULT_LISTING_MARKER.to_string(),
            cursor_param: DEFAULT_CURSOR_PARAM.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl FetchConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Where and how export files are written.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory for saved exports (default: current directory)
    pub output_dir: Option<PathBuf>,

    /// Indent the JSON document (default: true)
    pub pretty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            pretty: true,
        }
    }
}

impl ExportConfig {
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, creating it when missing.
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/tootfetch/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("tootfetch").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# tootfetch configuration

[browser]
# Run Chrome without a visible window
headless = true

# Give up on the initial page load after this many seconds
navigation_timeout_secs = 90

# Wait after navigation so the page can issue its first listing requests (milliseconds)
settle_ms = 3000

# Override the browser user agent
# user_agent = "Mozilla/5.0 ..."

[fetch]
# Number of posts requested when none is given
default_count = 100

# URL fragment that identifies the profile's statuses listing
listing_marker = "statuses?exclude_replies"

# Query parameter used to ask for older posts
cursor_param = "max_id"

# Timeout for direct page requests in seconds (unset: wait indefinitely)
# request_timeout_secs = 30

[export]
# Directory where exports are saved (unset: current directory)
# output_dir = "/home/me/exports"

# Indent the JSON document
pretty = true
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
