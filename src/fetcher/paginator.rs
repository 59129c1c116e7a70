//! Older-than pagination over the listing endpoint.
//!
//! Given the listing URL the page itself requested and the id of the last post
//! seen, keep asking for `?max_id=<cursor>` until the collector holds enough
//! posts, the server runs dry, or a page cannot be read.

use std::sync::Arc;

use tracing::{debug, info};
use url::Url;

use crate::app::Result;
use crate::domain::{Collector, PageOutcome};
use crate::fetcher::PageFetcher;

pub const DEFAULT_CURSOR_PARAM: &str = "max_id";

/// Why a pagination run stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationEnd {
    TargetReached,
    /// The server returned an empty page.
    Exhausted,
    /// The last post of a page had no id to continue from.
    NoCursor,
    /// Non-success status, transport error or unreadable body.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationSummary {
    pub end: PaginationEnd,
    pub pages: usize,
}

pub struct Paginator {
    fetcher: Arc<dyn PageFetcher + Send + Sync>,
    cursor_param: String,
}

impl Paginator {
    pub fn new(fetcher: Arc<dyn PageFetcher + Send + Sync>) -> Self {
        Self::with_cursor_param(fetcher, DEFAULT_CURSOR_PARAM)
    }

    pub fn with_cursor_param(fetcher: Arc<dyn PageFetcher + Send + Sync>, param: &str) -> Self {
        Self {
            fetcher,
            cursor_param: param.to_string(),
        }
    }

    /// Fetch older pages into `collector`, starting after `cursor`.
    ///
    /// Every follow-up URL is derived from `listing_url`, not from the previous
    /// follow-up. `on_page` is called with the collector size after each
    /// appended page.
    pub async fn paginate<F>(
        &self,
        listing_url: &str,
        cursor: String,
        collector: &mut Collector,
        mut on_page: F,
    ) -> PaginationSummary
    where
        F: FnMut(usize) + Send,
    {
        let mut cursor = cursor;
        let mut pages = 0;

        let end = loop {
            if collector.is_satisfied() {
                break PaginationEnd::TargetReached;
            }

            let url = match next_page_url(listing_url, &self.cursor_param, &cursor) {
                Ok(url) => url,
                Err(e) => break PaginationEnd::Failed(e.to_string()),
            };

            debug!("Fetching older page: {}", url);
            pages += 1;

            match self.fetcher.fetch_page(&url).await {
                PageOutcome::Records(posts) => {
                    let next = collector.ingest(posts);
                    on_page(collector.len());
                    match next {
                        Some(next) => cursor = next,
                        None => break PaginationEnd::NoCursor,
                    }
                }
                PageOutcome::Empty => break PaginationEnd::Exhausted,
                PageOutcome::Failed(reason) => {
                    debug!("Pagination stopped at {}: {}", url, reason);
                    break PaginationEnd::Failed(reason);
                }
            }
        };

        info!(
            "Pagination finished after {} pages with {} posts ({:?})",
            pages,
            collector.len(),
            end
        );

        PaginationSummary { end, pages }
    }
}

/// Build the URL of the page older than `cursor`.
///
/// Other query pairs keep their order; an existing `param` pair is replaced.
pub fn next_page_url(listing_url: &str, param: &str, cursor: &str) -> Result<String> {
    let mut url = Url::parse(listing_url)?;

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != param)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(param, cursor);

    Ok(url.into())
}
