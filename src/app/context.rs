use std::sync::Arc;

use crate::app::error::Result;
use crate::browser::{ChromeCapture, ListingCapture};
use crate::config::Config;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::paginator::Paginator;
use crate::fetcher::PageFetcher;
use crate::job::FetchJob;
use crate::observer::ListingObserver;

/// Wires the configured browser capture, HTTP fetcher and observer into fetch jobs.
pub struct AppContext {
    pub config: Arc<Config>,
    pub capture: Arc<dyn ListingCapture>,
    pub fetcher: Arc<dyn PageFetcher + Send + Sync>,
    pub observer: ListingObserver,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let observer = ListingObserver::new(&config.fetch.listing_marker);
        let capture: Arc<dyn ListingCapture> =
            Arc::new(ChromeCapture::new(config.browser.clone(), observer.clone()));
        let fetcher: Arc<dyn PageFetcher + Send + Sync> =
            Arc::new(HttpFetcher::new(config.fetch.request_timeout())?);

        Ok(Self {
            config: Arc::new(config),
            capture,
            fetcher,
            observer,
        })
    }

    pub fn job(&self) -> FetchJob {
        let paginator =
            Paginator::with_cursor_param(self.fetcher.clone(), &self.config.fetch.cursor_param);
        FetchJob::new(self.capture.clone(), self.observer.clone(), paginator)
    }
}
