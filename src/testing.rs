//! Scripted stand-ins for the network and the browser.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::app::{Result, TootfetchError};
use crate::browser::{Capture, CapturedResponse, ListingCapture};
use crate::domain::{PageOutcome, Post};
use crate::fetcher::PageFetcher;

/// Serves queued outcomes in order and records the URLs asked for.
pub struct ScriptedFetcher {
    outcomes: Mutex<VecDeque<PageOutcome>>,
    requested: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new(outcomes: Vec<PageOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch_page(&self, url: &str) -> PageOutcome {
        self.requested.lock().unwrap().push(url.to_string());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(PageOutcome::Empty)
    }
}

/// Replays a fixed capture, or fails to launch.
pub struct ScriptedCapture {
    capture: Option<Capture>,
}

impl ScriptedCapture {
    pub fn new(capture: Capture) -> Self {
        Self {
            capture: Some(capture),
        }
    }

    pub fn failing() -> Self {
        Self { capture: None }
    }
}

#[async_trait]
impl ListingCapture for ScriptedCapture {
    async fn capture(&self, _url: &str) -> Result<Capture> {
        self.capture
            .clone()
            .ok_or_else(|| TootfetchError::Browser("no browser available".into()))
    }
}

/// `size` posts with descending ids starting at `first_id`.
pub fn posts(first_id: u64, size: u64) -> Vec<Post> {
    (0..size)
        .map(|i| {
            serde_json::from_value(json!({
                "id": (first_id - i).to_string(),
                "content": format!("<p>post {}</p>", first_id - i),
            }))
            .unwrap()
        })
        .collect()
}

pub fn page(first_id: u64, size: u64) -> PageOutcome {
    PageOutcome::Records(posts(first_id, size))
}

/// JSON body of a listing page, as the browser would capture it.
pub fn page_body(first_id: u64, size: u64) -> Vec<u8> {
    serde_json::to_vec(&posts(first_id, size)).unwrap()
}

pub fn listing_response(url: &str, status: u16, body: Vec<u8>) -> CapturedResponse {
    CapturedResponse {
        url: url.to_string(),
        status,
        body,
    }
}
