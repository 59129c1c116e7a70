pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::app::{AppContext, Result};
use crate::job::{FetchEvent, FetchReport};

use self::app::TuiApp;
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let mut tui_app = TuiApp::new(ctx.config.fetch.default_count);
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let (progress_tx, mut progress_rx) = mpsc::unbounded_channel::<FetchEvent>();
    let mut running: Option<JoinHandle<FetchReport>> = None;

    loop {
        terminal.draw(|frame| layout::render(frame, &tui_app))?;

        match event_handler.next()? {
            AppEvent::Key(key) => match Action::from(key) {
                Action::Quit => {
                    tui_app.should_quit = true;
                }
                Action::NextField => {
                    tui_app.field = tui_app.field.next();
                }
                Action::PrevField => {
                    tui_app.field = tui_app.field.prev();
                }
                Action::Input(c) => {
                    tui_app.input_char(c);
                }
                Action::Backspace => {
                    tui_app.backspace();
                }
                Action::Fetch => {
                    if let Some(request) = tui_app.begin_fetch() {
                        let job = ctx.job();
                        let tx = progress_tx.clone();
                        running = Some(tokio::spawn(async move {
                            job.run(&request, Some(&tx)).await
                        }));
                    }
                }
                Action::Save => {
                    let saved = tui_app.ready_document().map(|document| {
                        document.save(
                            &ctx.config.export.output_dir(),
                            Local::now(),
                            ctx.config.export.pretty,
                        )
                    });
                    match saved {
                        Some(Ok(path)) => tui_app.mark_saved(path),
                        Some(Err(e)) => tui_app.set_error(format!("Failed to save: {}", e)),
                        None => tui_app.set_status("Nothing to save yet".to_string()),
                    }
                }
                Action::None => {}
            },
            AppEvent::Tick => {
                tui_app.tick();
            }
        }

        while let Ok(event) = progress_rx.try_recv() {
            tui_app.apply(event);
        }

        if let Some(handle) = running.take_if(|handle| handle.is_finished()) {
            match handle.await {
                Ok(report) => tui_app.finish(report),
                Err(e) => tui_app.fail(format!("Fetch task failed: {}", e)),
            }
        }

        if tui_app.should_quit {
            break;
        }
    }

    if let Some(handle) = running {
        handle.abort();
    }

    Ok(())
}
