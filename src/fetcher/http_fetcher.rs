use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::app::Result;
use crate::domain::PageOutcome;
use crate::fetcher::PageFetcher;

pub const USER_AGENT: &str = concat!("tootfetch/", env!("CARGO_PKG_VERSION"));

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher. Without a timeout, requests wait as long as the server does.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .user_agent(USER_AGENT);

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> PageOutcome {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return PageOutcome::Failed(e.to_string()),
        };

        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(body) => PageOutcome::from_response(status, &body),
            Err(e) => PageOutcome::Failed(e.to_string()),
        }
    }
}
