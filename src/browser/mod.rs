//! Headless browser session for intercepting a profile page's listing calls.
//!
//! The profile page's own scripts know which account id and endpoint to call;
//! rather than reproduce that, the session loads the page and listens to the
//! network traffic it produces.
//!
//! # Architecture
//!
//! ```text
//! launch Chrome → open page → listen (CDP network events) → navigate
//!     → settle → close → captured listing responses
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use tootfetch::browser::{ChromeCapture, ListingCapture, SessionConfig};
//! use tootfetch::observer::ListingObserver;
//!
//! let capture = ChromeCapture::new(SessionConfig::default(), ListingObserver::default());
//! let result = capture.capture("https://mastodon.social/@Gargron").await?;
//! ```

mod chrome;
mod config;

pub use chrome::ChromeCapture;
pub use config::SessionConfig;

use crate::app::Result;
use async_trait::async_trait;

/// A listing response observed while the page loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedResponse {
    /// Resolved request URL
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: Vec<u8>,
}

/// Everything one browser session produced
#[derive(Debug, Clone, Default)]
pub struct Capture {
    /// Matching responses in the order they finished loading
    pub responses: Vec<CapturedResponse>,
    /// Set when navigation failed or timed out; the capture is still usable
    pub navigation_error: Option<String>,
}

/// Source of listing responses for a profile URL
#[async_trait]
pub trait ListingCapture: Send + Sync {
    /// Load `url` and return the listing responses it triggered.
    ///
    /// Navigation problems are reported in [`Capture::navigation_error`];
    /// `Err` means no session could be established at all.
    async fn capture(&self, url: &str) -> Result<Capture>;
}
