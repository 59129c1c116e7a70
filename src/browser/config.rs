use serde::{Deserialize, Serialize};
use std::time::Duration;

const MIN_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the headless browser session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Whether to run the browser in headless mode (default: true)
    pub headless: bool,

    /// Page navigation timeout in seconds (default: 90)
    pub navigation_timeout_secs: u64,

    /// Wait after navigation for the page's own requests in milliseconds (default: 3000)
    pub settle_ms: u64,

    /// User agent string to use
    pub user_agent: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            headless: true,
            navigation_timeout_secs: 90,
            settle_ms: 3000,
            user_agent: None,
        }
    }
}

impl SessionConfig {
    /// Get the navigation timeout as a Duration
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    /// Deadline chromiumoxide applies to every CDP request, navigation included.
    ///
    /// Never below chromiumoxide's own 30s default, so a short navigation
    /// timeout is enforced by the caller rather than by failing other calls.
    pub fn request_timeout(&self) -> Duration {
        self.navigation_timeout().max(MIN_REQUEST_TIMEOUT)
    }

    /// Get the settle interval as a Duration
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = SessionConfig::default();
        assert!(config.headless);
        assert_eq!(config.navigation_timeout_secs, 90);
        assert_eq!(config.settle_ms, 3000);
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn test_durations() {
        let config = SessionConfig {
            navigation_timeout_secs: 15,
            settle_ms: 500,
            ..Default::default()
        };
        assert_eq!(config.navigation_timeout(), Duration::from_secs(15));
        assert_eq!(config.settle(), Duration::from_millis(500));
    }

    #[test]
    fn test_request_timeout_covers_navigation() {
        let config = SessionConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(90));

        let short = SessionConfig {
            navigation_timeout_secs: 5,
            ..Default::default()
        };
        assert_eq!(short.request_timeout(), Duration::from_secs(30));
    }
}
