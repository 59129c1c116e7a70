//! One fetch operation, from profile URL to export document.
//!
//! ```text
//! capture (browser) → observe each listing response → paginate from its cursor
//!     → truncate → ExportDocument
//! ```
//!
//! Only a blank address or a zero count is an error. An address the browser
//! cannot load, browser and navigation failures all become warnings and the
//! job still produces a (possibly empty) document.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::app::{Result, TootfetchError};
use crate::browser::ListingCapture;
use crate::domain::Collector;
use crate::export::ExportDocument;
use crate::fetcher::paginator::Paginator;
use crate::observer::ListingObserver;

/// A validated fetch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    url: String,
    count: usize,
}

impl FetchRequest {
    pub fn new(url: &str, count: usize) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(TootfetchError::MissingUrl);
        }
        if count == 0 {
            return Err(TootfetchError::InvalidCount(count.to_string()));
        }

        Ok(Self {
            url: url.to_string(),
            count,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

/// Progress notifications for a running job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchEvent {
    Started { url: String },
    Captured { responses: usize },
    Collected { total: usize },
    Warning(String),
    Finished { exported: usize },
}

#[derive(Debug, Clone)]
pub struct FetchReport {
    pub document: ExportDocument,
    pub warnings: Vec<String>,
    /// Listing responses intercepted from the page itself
    pub captured: usize,
    /// Pages fetched directly while paginating
    pub pages: usize,
}

pub struct FetchJob {
    capture: Arc<dyn ListingCapture>,
    observer: ListingObserver,
    paginator: Paginator,
}

impl FetchJob {
    pub fn new(capture: Arc<dyn ListingCapture>, observer: ListingObserver, paginator: Paginator) -> Self {
        Self {
            capture,
            observer,
            paginator,
        }
    }

    pub async fn run(
        &self,
        request: &FetchRequest,
        progress: Option<&mpsc::UnboundedSender<FetchEvent>>,
    ) -> FetchReport {
        let emit = |event: FetchEvent| {
            if let Some(tx) = progress {
                let _ = tx.send(event);
            }
        };

        info!("Fetching up to {} posts from {}", request.count(), request.url());
        emit(FetchEvent::Started {
            url: request.url().to_string(),
        });

        let mut warnings = Vec::new();
        let capture = match self.capture.capture(request.url()).await {
            Ok(capture) => capture,
            Err(e) => {
                warn!("Browser session failed: {}", e);
                warnings.push(e.to_string());
                Default::default()
            }
        };

        if let Some(ref e) = capture.navigation_error {
            warnings.push(e.clone());
        }
        emit(FetchEvent::Captured {
            responses: capture.responses.len(),
        });

        let mut collector = Collector::new(request.count());
        let mut pages = 0;

        for response in &capture.responses {
            let Some(cursor) = self.observer.observe(response, &mut collector) else {
                continue;
            };
            emit(FetchEvent::Collected {
                total: collector.len(),
            });

            if collector.is_satisfied() {
                continue;
            }

            let summary = self
                .paginator
                .paginate(&response.url, cursor, &mut collector, |total| {
                    emit(FetchEvent::Collected { total })
                })
                .await;
            pages += summary.pages;
        }

        for warning in &warnings {
            emit(FetchEvent::Warning(warning.clone()));
        }

        let document = ExportDocument::from_collected(collector.into_posts(), request.count());
        info!("Fetched {} posts", document.len());
        emit(FetchEvent::Finished {
            exported: document.len(),
        });

        FetchReport {
            document,
            warnings,
            captured: capture.responses.len(),
            pages,
        }
    }
}
