use std::collections::HashMap;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{
    EventLoadingFinished, EventResponseReceived, GetResponseBodyParams, RequestId,
};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::app::{Result, TootfetchError};
use crate::browser::config::SessionConfig;
use crate::browser::{Capture, CapturedResponse, ListingCapture};
use crate::observer::ListingObserver;

/// Chrome-driven capture of a profile page's listing responses
pub struct ChromeCapture {
    config: SessionConfig,
    observer: ListingObserver,
}

impl ChromeCapture {
    pub fn new(config: SessionConfig, observer: ListingObserver) -> Self {
        Self { config, observer }
    }

    async fn launch(&self) -> Result<(Browser, JoinHandle<()>)> {
        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-software-rasterizer")
            .request_timeout(self.config.request_timeout());

        if !self.config.headless {
            builder = builder.with_head();
        }

        let browser_config = builder
            .build()
            .map_err(|e| TootfetchError::Browser(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
            TootfetchError::Browser(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            ))
        })?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler error: {}", e);
                }
            }
        });

        Ok((browser, handler_task))
    }

    /// Open the profile, record listing responses, wait for the page to settle.
    async fn record(&self, browser: &Browser, url: &str) -> Result<Capture> {
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| TootfetchError::Browser(format!("Failed to create page: {}", e)))?;

        if let Some(ref ua) = self.config.user_agent {
            page.set_user_agent(ua)
                .await
                .map_err(|e| TootfetchError::Browser(format!("Failed to set user agent: {}", e)))?;
        }

        let (tx, mut rx) = mpsc::unbounded_channel();
        let listener = self.spawn_listener(&page, tx).await?;

        info!("Navigating to {}", url);
        let navigation_error =
            match tokio::time::timeout(self.config.navigation_timeout(), page.goto(url)).await {
                Ok(Ok(_)) => None,
                Ok(Err(e)) => Some(format!("Navigation error: {}", e)),
                Err(_) => Some(format!(
                    "Navigation error: timed out after {}s",
                    self.config.navigation_timeout_secs
                )),
            };

        match navigation_error {
            None => tokio::time::sleep(self.config.settle()).await,
            Some(ref e) => warn!("{}", e),
        }

        listener.abort();
        if let Err(e) = page.close().await {
            debug!("Failed to close page: {}", e);
        }

        let mut responses = Vec::new();
        while let Ok(response) = rx.try_recv() {
            responses.push(response);
        }
        info!("Captured {} listing responses", responses.len());

        Ok(Capture {
            responses,
            navigation_error,
        })
    }

    /// Forward the bodies of matching responses once they have finished loading.
    async fn spawn_listener(
        &self,
        page: &Page,
        tx: mpsc::UnboundedSender<CapturedResponse>,
    ) -> Result<JoinHandle<()>> {
        let mut received = page
            .event_listener::<EventResponseReceived>()
            .await
            .map_err(|e| TootfetchError::Browser(format!("Failed to observe responses: {}", e)))?;
        let mut finished = page
            .event_listener::<EventLoadingFinished>()
            .await
            .map_err(|e| TootfetchError::Browser(format!("Failed to observe responses: {}", e)))?;

        let page = page.clone();
        let mut pending = PendingResponses::new(self.observer.clone());

        Ok(tokio::spawn(async move {
            loop {
                tokio::select! {
                    Some(event) = received.next() => {
                        pending.on_response(
                            event.request_id.inner(),
                            &event.response.url,
                            event.response.status,
                        );
                    }
                    Some(event) = finished.next() => {
                        let Some((url, status)) = pending.on_finished(event.request_id.inner()) else {
                            continue;
                        };
                        match response_body(&page, event.request_id.clone()).await {
                            Ok(body) => {
                                if tx.send(CapturedResponse { url, status, body }).is_err() {
                                    break;
                                }
                            }
                            Err(e) => debug!("Skipping {}: {}", url, e),
                        }
                    }
                    else => break,
                }
            }
        }))
    }
}

async fn response_body(page: &Page, request_id: RequestId) -> Result<Vec<u8>> {
    let reply = page
        .execute(GetResponseBodyParams::new(request_id))
        .await
        .map_err(|e| TootfetchError::Browser(format!("Failed to read response body: {}", e)))?;

    let body = reply.result;
    decode_body(body.body, body.base64_encoded)
}

/// Turn a `Network.getResponseBody` payload into raw bytes.
fn decode_body(body: String, base64_encoded: bool) -> Result<Vec<u8>> {
    if base64_encoded {
        BASE64
            .decode(body.as_bytes())
            .map_err(|e| TootfetchError::Browser(format!("Invalid base64 body: {}", e)))
    } else {
        Ok(body.into_bytes())
    }
}

/// Listing responses whose headers arrived but whose body is still loading.
///
/// Keyed by CDP request id; only URLs the observer matches are tracked.
struct PendingResponses {
    observer: ListingObserver,
    by_request: HashMap<String, (String, u16)>,
}

impl PendingResponses {
    fn new(observer: ListingObserver) -> Self {
        Self {
            observer,
            by_request: HashMap::new(),
        }
    }

    /// `Network.responseReceived`: returns whether the response is tracked.
    fn on_response(&mut self, request_id: &str, url: &str, status: i64) -> bool {
        if !self.observer.matches(url) {
            return false;
        }
        let status = u16::try_from(status).unwrap_or_default();
        self.by_request
            .insert(request_id.to_string(), (url.to_string(), status));
        true
    }

    /// `Network.loadingFinished`: the tracked (url, status), if any.
    fn on_finished(&mut self, request_id: &str) -> Option<(String, u16)> {
        self.by_request.remove(request_id)
    }
}

#[async_trait]
impl ListingCapture for ChromeCapture {
    async fn capture(&self, url: &str) -> Result<Capture> {
        let (mut browser, handler_task) = self.launch().await?;

        let result = self.record(&browser, url).await;

        if let Err(e) = browser.close().await {
            debug!("Failed to close browser: {}", e);
        }
        if let Err(e) = browser.wait().await {
            debug!("Failed to wait for browser exit: {}", e);
        }
        handler_task.abort();

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str =
        "https://social.example/api/v1/accounts/7/statuses?exclude_replies=true&limit=20";

    #[test]
    fn test_decode_plain_body() {
        let body = decode_body(r#"[{"id":"1"}]"#.to_string(), false).unwrap();
        assert_eq!(body, br#"[{"id":"1"}]"#.to_vec());
    }

    #[test]
    fn test_decode_base64_body() {
        let encoded = BASE64.encode(r#"[{"id":"1"}]"#);
        let body = decode_body(encoded, true).unwrap();
        assert_eq!(body, br#"[{"id":"1"}]"#.to_vec());
    }

    #[test]
    fn test_decode_invalid_base64() {
        let err = decode_body("not base64!!".to_string(), true).unwrap_err();
        assert!(matches!(err, TootfetchError::Browser(ref msg) if msg.starts_with("Invalid base64 body")));
    }

    #[test]
    fn test_pending_matches_by_request_id() {
        let mut pending = PendingResponses::new(ListingObserver::default());

        assert!(pending.on_response("req-1", LISTING, 200));
        assert_eq!(pending.on_finished("req-1"), Some((LISTING.to_string(), 200)));
        // Each response is handed out once
        assert_eq!(pending.on_finished("req-1"), None);
    }

    #[test]
    fn test_pending_ignores_unmatched_urls() {
        let mut pending = PendingResponses::new(ListingObserver::default());

        assert!(!pending.on_response("req-2", "https://social.example/api/v1/instance", 200));
        assert_eq!(pending.on_finished("req-2"), None);
    }

    #[test]
    fn test_pending_ignores_unknown_finished_ids() {
        let mut pending = PendingResponses::new(ListingObserver::default());
        pending.on_response("req-1", LISTING, 200);

        assert_eq!(pending.on_finished("req-9"), None);
        assert_eq!(pending.on_finished("req-1"), Some((LISTING.to_string(), 200)));
    }

    #[test]
    fn test_pending_out_of_range_status() {
        let mut pending = PendingResponses::new(ListingObserver::default());
        pending.on_response("req-1", LISTING, -1);
        assert_eq!(pending.on_finished("req-1"), Some((LISTING.to_string(), 0)));
    }
}
