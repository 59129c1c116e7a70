pub mod http_fetcher;
pub mod paginator;

use async_trait::async_trait;

use crate::domain::PageOutcome;

/// Direct (browser-less) access to one page of the listing endpoint.
#[async_trait]
pub trait PageFetcher {
    async fn fetch_page(&self, url: &str) -> PageOutcome;
}
