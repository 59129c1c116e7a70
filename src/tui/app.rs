use std::path::PathBuf;

use crate::app::{Result, TootfetchError};
use crate::export::ExportDocument;
use crate::job::{FetchEvent, FetchReport, FetchRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Url,
    Count,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Url => Field::Count,
            Field::Count => Field::Url,
        }
    }

    pub fn prev(self) -> Self {
        // Two fields: cycling either way lands on the other one
        self.next()
    }
}

pub const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone)]
pub enum FetchState {
    Idle,
    Fetching { collected: usize, spinner: usize },
    Ready {
        document: ExportDocument,
        saved_to: Option<PathBuf>,
    },
}

pub struct TuiApp {
    pub field: Field,
    pub url_input: String,
    pub count_input: String,
    pub state: FetchState,
    pub warnings: Vec<String>,
    pub status_message: Option<String>,
    pub error_message: Option<String>,
    pub should_quit: bool,
}

impl TuiApp {
    pub fn new(default_count: usize) -> Self {
        Self {
            field: Field::Url,
            url_input: String::new(),
            count_input: default_count.to_string(),
            state: FetchState::Idle,
            warnings: Vec::new(),
            status_message: None,
            error_message: None,
            should_quit: false,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, FetchState::Fetching { .. })
    }

    pub fn input_char(&mut self, c: char) {
        self.leave_ready();
        match self.field {
            Field::Url => {
                if !c.is_whitespace() {
                    self.url_input.push(c);
                }
            }
            Field::Count => {
                if c.is_ascii_digit() {
                    self.count_input.push(c);
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        self.leave_ready();
        match self.field {
            Field::Url => {
                self.url_input.pop();
            }
            Field::Count => {
                self.count_input.pop();
            }
        }
    }

    /// Editing the form discards a finished export that no longer matches it.
    fn leave_ready(&mut self) {
        if matches!(self.state, FetchState::Ready { .. }) {
            self.state = FetchState::Idle;
            self.status_message = None;
        }
    }

    /// Validate the form into a request.
    pub fn request(&self) -> Result<FetchRequest> {
        let count = self
            .count_input
            .parse::<usize>()
            .map_err(|_| TootfetchError::InvalidCount(self.count_input.clone()))?;
        FetchRequest::new(&self.url_input, count)
    }

    /// Move to `Fetching` and hand back the request, unless a fetch is
    /// already running or the form is invalid.
    pub fn begin_fetch(&mut self) -> Option<FetchRequest> {
        if self.is_busy() {
            self.set_status("A fetch is already running".to_string());
            return None;
        }

        match self.request() {
            Ok(request) => {
                self.state = FetchState::Fetching {
                    collected: 0,
                    spinner: 0,
                };
                self.warnings.clear();
                self.error_message = None;
                self.status_message = None;
                Some(request)
            }
            Err(e) => {
                self.error_message = Some(e.to_string());
                None
            }
        }
    }

    pub fn apply(&mut self, event: FetchEvent) {
        match event {
            FetchEvent::Collected { total } => {
                if let FetchState::Fetching { collected, .. } = &mut self.state {
                    *collected = total;
                }
            }
            FetchEvent::Warning(warning) => {
                if !self.warnings.contains(&warning) {
                    self.warnings.push(warning);
                }
            }
            FetchEvent::Started { .. } | FetchEvent::Captured { .. } | FetchEvent::Finished { .. } => {}
        }
    }

    pub fn finish(&mut self, report: FetchReport) {
        for warning in report.warnings {
            if !self.warnings.contains(&warning) {
                self.warnings.push(warning);
            }
        }
        self.set_status(format!("Fetched {} posts", report.document.len()));
        self.state = FetchState::Ready {
            document: report.document,
            saved_to: None,
        };
    }

    /// The background task died without a report.
    pub fn fail(&mut self, message: String) {
        self.state = FetchState::Idle;
        self.error_message = Some(message);
    }

    pub fn ready_document(&self) -> Option<&ExportDocument> {
        match &self.state {
            FetchState::Ready { document, .. } => Some(document),
            _ => None,
        }
    }

    pub fn mark_saved(&mut self, path: PathBuf) {
        if let FetchState::Ready { saved_to, .. } = &mut self.state {
            self.status_message = Some(format!("Saved {}", path.display()));
            *saved_to = Some(path);
        }
    }

    pub fn tick(&mut self) {
        if let FetchState::Fetching { spinner, .. } = &mut self.state {
            *spinner = (*spinner + 1) % SPINNER.len();
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::posts;

    fn filled(url: &str) -> TuiApp {
        let mut app = TuiApp::new(100);
        for c in url.chars() {
            app.input_char(c);
        }
        app
    }

    fn report(size: u64, warnings: Vec<String>) -> FetchReport {
        FetchReport {
            document: ExportDocument::from_collected(posts(size, size), 100),
            warnings,
            captured: 1,
            pages: 0,
        }
    }

    #[test]
    fn test_count_field_accepts_digits_only() {
        let mut app = TuiApp::new(100);
        app.field = Field::Count;
        app.backspace();
        app.backspace();
        app.input_char('x');
        app.input_char('5');
        assert_eq!(app.count_input, "15");
    }

    #[test]
    fn test_field_cycling() {
        assert_eq!(Field::Url.next(), Field::Count);
        assert_eq!(Field::Count.next(), Field::Url);
        assert_eq!(Field::Url.prev(), Field::Count);
    }

    #[test]
    fn test_missing_url_is_reported() {
        let mut app = TuiApp::new(100);
        assert!(app.begin_fetch().is_none());
        assert_eq!(app.error_message.as_deref(), Some("Please enter a profile address"));
        assert!(!app.is_busy());
    }

    #[test]
    fn test_zero_count_is_reported() {
        let mut app = filled("https://social.example/@someone");
        app.count_input.clear();
        assert!(app.begin_fetch().is_none());
        assert!(app.error_message.is_some());
    }

    #[test]
    fn test_overflowing_count_keeps_typed_text() {
        let mut app = filled("https://social.example/@someone");
        app.count_input = "99999999999999999999".into();

        assert!(app.begin_fetch().is_none());
        assert_eq!(
            app.error_message.as_deref(),
            Some("Invalid post count: 99999999999999999999 (must be a whole number of at least 1)")
        );
    }

    #[test]
    fn test_edit_after_ready_returns_to_idle() {
        let mut app = filled("https://social.example/@someone");
        app.begin_fetch();
        app.finish(report(5, Vec::new()));
        assert!(app.ready_document().is_some());

        app.input_char('x');
        assert!(matches!(app.state, FetchState::Idle));
        assert!(app.status_message.is_none());

        app.finish(report(5, Vec::new()));
        app.field = Field::Count;
        app.backspace();
        assert!(matches!(app.state, FetchState::Idle));
        assert_eq!(app.count_input, "10");
    }

    #[test]
    fn test_busy_guard_rejects_second_fetch() {
        let mut app = filled("https://social.example/@someone");

        let request = app.begin_fetch().expect("first fetch starts");
        assert_eq!(request.count(), 100);
        assert!(app.is_busy());

        assert!(app.begin_fetch().is_none());
        assert_eq!(app.status_message.as_deref(), Some("A fetch is already running"));
    }

    #[test]
    fn test_progress_and_finish() {
        let mut app = filled("https://social.example/@someone");
        app.begin_fetch();

        app.apply(FetchEvent::Collected { total: 40 });
        assert!(matches!(app.state, FetchState::Fetching { collected: 40, .. }));

        app.tick();
        assert!(matches!(app.state, FetchState::Fetching { spinner: 1, .. }));

        app.apply(FetchEvent::Warning("Navigation error: boom".into()));
        app.finish(report(40, vec!["Navigation error: boom".into()]));

        assert!(!app.is_busy());
        assert_eq!(app.ready_document().map(ExportDocument::len), Some(40));
        assert_eq!(app.status_message.as_deref(), Some("Fetched 40 posts"));
        assert_eq!(app.warnings, vec!["Navigation error: boom".to_string()]);

        // A new fetch is allowed once the previous one finished
        assert!(app.begin_fetch().is_some());
        assert!(app.warnings.is_empty());
    }

    #[test]
    fn test_mark_saved_only_when_ready() {
        let mut app = TuiApp::new(100);
        app.mark_saved(PathBuf::from("/tmp/x-posts.json"));
        assert!(app.status_message.is_none());

        app.finish(report(3, Vec::new()));
        app.mark_saved(PathBuf::from("/tmp/x-posts.json"));
        assert_eq!(app.status_message.as_deref(), Some("Saved /tmp/x-posts.json"));
        assert!(matches!(app.state, FetchState::Ready { saved_to: Some(_), .. }));
    }

    #[test]
    fn test_progress_events_over_channel() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut app = filled("https://social.example/@someone");
        app.begin_fetch();

        tx.send(FetchEvent::Collected { total: 12 }).unwrap();
        drop(tx);
        while let Some(event) = tokio_test::block_on(rx.recv()) {
            app.apply(event);
        }

        assert!(matches!(app.state, FetchState::Fetching { collected: 12, .. }));
    }
}
