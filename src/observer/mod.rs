//! Recognition of the profile page's own listing requests.

use tracing::debug;

use crate::browser::CapturedResponse;
use crate::domain::{Collector, PageOutcome};

/// URL fragment identifying the statuses listing with replies excluded.
pub const DEFAULT_LISTING_MARKER: &str = "statuses?exclude_replies";

#[derive(Debug, Clone)]
pub struct ListingObserver {
    marker: String,
}

impl Default for ListingObserver {
    fn default() -> Self {
        Self::new(DEFAULT_LISTING_MARKER)
    }
}

impl ListingObserver {
    pub fn new(marker: &str) -> Self {
        Self {
            marker: marker.to_string(),
        }
    }

    pub fn matches(&self, url: &str) -> bool {
        url.contains(&self.marker)
    }

    /// Feed one captured response into `collector`.
    ///
    /// Returns the pagination cursor when the response was a non-empty listing
    /// page. Anything else (other endpoints, error statuses, empty or malformed
    /// bodies) leaves the collector untouched.
    pub fn observe(&self, response: &CapturedResponse, collector: &mut Collector) -> Option<String> {
        if !self.matches(&response.url) {
            return None;
        }

        match PageOutcome::from_response(response.status, &response.body) {
            PageOutcome::Records(posts) => {
                debug!("Intercepted {} posts from {}", posts.len(), response.url);
                collector.ingest(posts)
            }
            PageOutcome::Empty => None,
            PageOutcome::Failed(reason) => {
                debug!("Ignoring listing response {}: {}", response.url, reason);
                None
            }
        }
    }
}
