//! # tootfetch
//!
//! Fetch public posts from a Mastodon profile and export them as JSON.
//!
//! ## Architecture
//!
//! ```text
//! Browser capture → Observer → Paginator → Export → UI
//! ```
//!
//! The profile page is loaded in headless Chrome so that its own scripts issue
//! the statuses listing request; that response is intercepted, and older pages
//! are then fetched directly with `max_id` until enough posts are collected.
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive form
//! tootfetch
//!
//! # One-shot export of 200 posts into ./exports
//! tootfetch fetch https://mastodon.social/@Gargron -n 200 -o exports
//! ```

/// Application context and error types.
///
/// The [`AppContext`](app::AppContext) struct wires together browser capture,
/// HTTP fetcher and observer, and hands out [`FetchJob`](job::FetchJob)s.
pub mod app;

/// Headless Chrome session that records the page's listing responses.
///
/// - [`ListingCapture`](browser::ListingCapture): Async trait for capture sources
/// - [`ChromeCapture`](browser::ChromeCapture): chromiumoxide implementation
/// - [`SessionConfig`](browser::SessionConfig): Timeouts and browser options
pub mod browser;

/// Command-line interface using clap.
///
/// - `fetch <url>` - Fetch and export without the form
/// - `tui` - Launch the interactive form (default)
/// - `config path` - Print the config file location
pub mod cli;

/// Configuration loaded from `~/.config/tootfetch/config.toml`.
pub mod config;

/// Core domain models: [`Post`](domain::Post), [`Collector`](domain::Collector)
/// and [`PageOutcome`](domain::PageOutcome).
pub mod domain;

/// The `{"posts": [...]}` document and its timestamped file name.
pub mod export;

/// Direct page fetching and older-than pagination.
///
/// - [`PageFetcher`](fetcher::PageFetcher): Async trait for page fetching
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
/// - [`Paginator`](fetcher::paginator::Paginator): Cursor loop over the listing
pub mod fetcher;

/// One fetch operation from profile URL to export document.
pub mod job;

/// Recognition and parsing of intercepted listing responses.
pub mod observer;

/// HTML to plain text for post bodies.
pub mod sanitizer;

/// Terminal form built with ratatui.
///
/// Tab switches field, Enter fetches, Ctrl+S saves the export, Esc quits.
pub mod tui;

#[cfg(test)]
mod testing;
