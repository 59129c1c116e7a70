use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::export::{file_name, MEDIA_TYPE};
use crate::tui::app::{Field, FetchState, TuiApp, SPINNER};

pub fn render(frame: &mut Frame, app: &TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // URL input
            Constraint::Length(3), // Count input
            Constraint::Min(5),    // Status pane
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    render_input(
        frame,
        " Profile address (e.g. https://mastodon.social/@Gargron) ",
        &app.url_input,
        app.field == Field::Url,
        chunks[0],
    );
    render_input(
        frame,
        " Number of posts to fetch ",
        &app.count_input,
        app.field == Field::Count,
        chunks[1],
    );
    render_status_pane(frame, app, chunks[2]);
    render_help_bar(frame, app, chunks[3]);
}

fn render_input(frame: &mut Frame, title: &str, value: &str, is_active: bool, area: Rect) {
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let content = if is_active {
        format!("{}▏", value)
    } else {
        value.to_string()
    };

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn render_status_pane(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let mut lines = Vec::new();

    match &app.state {
        FetchState::Idle => {
            lines.push(Line::from("Enter a profile address and press Enter to fetch posts."));
        }
        FetchState::Fetching { collected, spinner } => {
            lines.push(Line::from(Span::styled(
                format!(
                    "{} Fetching posts (this may take a while)... {} collected",
                    SPINNER[*spinner % SPINNER.len()],
                    collected
                ),
                Style::default().fg(Color::Cyan),
            )));
        }
        FetchState::Ready { document, saved_to } => {
            lines.push(Line::from(Span::styled(
                format!("Fetched {} posts", document.len()),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            match saved_to {
                Some(path) => lines.push(Line::from(format!("Saved to {}", path.display()))),
                None => lines.push(Line::from(format!(
                    "Press Ctrl+S to save as {} ({})",
                    file_name(chrono::Local::now()),
                    MEDIA_TYPE
                ))),
            }
        }
    }

    if let Some(ref error) = app.error_message {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    if !app.warnings.is_empty() {
        lines.push(Line::from(""));
        for warning in &app.warnings {
            lines.push(Line::from(Span::styled(
                format!("Warning: {}", warning),
                Style::default().fg(Color::Yellow),
            )));
        }
    }

    let block = Block::default()
        .title(" Mastodon posts fetcher ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_help_bar(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let hints = if app.is_busy() {
        "Fetching...  Esc:Quit"
    } else {
        "Tab:Field  Enter:Fetch  Ctrl+S:Save  Esc:Quit"
    };

    let status = match app.status_message {
        Some(ref msg) => format!("{}  |  {}", msg, hints),
        None => hints.to_string(),
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(Color::White).bg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(app: &TuiApp) -> String {
        let backend = TestBackend::new(80, 16);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_renders_form() {
        let app = TuiApp::new(100);
        let screen = rendered(&app);
        assert!(screen.contains("Number of posts to fetch"));
        assert!(screen.contains("100"));
        assert!(screen.contains("Enter:Fetch"));
    }

    #[test]
    fn test_status_message_keeps_key_hints() {
        let mut app = TuiApp::new(100);
        app.set_status("Saved /tmp/x-posts.json".into());

        let screen = rendered(&app);
        assert!(screen.contains("Saved /tmp/x-posts.json"));
        assert!(screen.contains("Enter:Fetch"));
    }

    #[test]
    fn test_renders_error_and_warning() {
        let mut app = TuiApp::new(100);
        app.set_error("Please enter a profile address".into());
        app.warnings.push("Navigation error: timeout".into());

        let screen = rendered(&app);
        assert!(screen.contains("Please enter a profile address"));
        assert!(screen.contains("Warning: Navigation error: timeout"));
    }
}
