// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, finished analyses)
// - Spawning analysis requests off the UI task

pub mod app;
pub mod clipboard;
pub mod components;
pub mod input;
pub mod layout;
pub mod modal;
pub mod scroll;
pub mod traits;
pub mod views;

use crate::analysis::{AnalysisClient, AnalysisError, AnalysisResponse, DocumentPreview};
use crate::config::Config;
use crate::logging::LogBuffer;
use crate::upload::Submission;
use anyhow::{Context, Result};
use app::{App, View};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::{Modal, ModalAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Outcome of a spawned request, routed back to the UI task
#[derive(Debug)]
pub struct AnalysisCompleted {
    pub generation: u64,
    pub result: Result<AnalysisResponse, AnalysisError>,
    pub preview: Option<DocumentPreview>,
}

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// when done, even if the loop failed.
pub async fn run_tui(config: Config, log_buffer: LogBuffer) -> Result<()> {
    let client = AnalysisClient::new(&config.api_base_url, config.request_timeout_secs)?;

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::with_config(log_buffer, config);
    let result = run_event_loop(&mut terminal, &mut app, &client).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources with tokio::select!:
/// 1. Keyboard input
/// 2. Timer ticks (spinner animation, toast expiry)
/// 3. Completed analyses from spawned requests
///
/// The UI task never awaits the network itself; submissions parked on the
/// App are spawned after each iteration.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &AnalysisClient,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AnalysisCompleted>(16);
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            Some(done) = rx.recv() => {
                app.finish_analysis(done.generation, done.result, done.preview);
            }
        }

        if let Some(submission) = app.take_submission() {
            spawn_analysis(client, submission, tx.clone());
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Send the request on its own task; the outcome comes back over `tx`.
///
/// The preview is decoded on the blocking pool while the request is in
/// flight, so the UI task never touches full-size pixels.
fn spawn_analysis(
    client: &AnalysisClient,
    submission: Submission,
    tx: mpsc::Sender<AnalysisCompleted>,
) {
    let client = client.clone();
    tokio::spawn(async move {
        let Submission {
            generation,
            request,
        } = submission;
        let request = Arc::new(request);
        let decode = {
            let request = Arc::clone(&request);
            tokio::task::spawn_blocking(move || DocumentPreview::from_request(&request))
        };
        let (result, preview) = tokio::join!(client.analyze(&request), decode);
        let preview = match preview {
            Ok(preview) => Some(preview),
            Err(e) => {
                tracing::warn!(generation, error = %e, "Preview decode task failed");
                None
            }
        };
        let done = AnalysisCompleted {
            generation,
            result,
            preview,
        };
        if tx.send(done).await.is_err() {
            tracing::debug!(generation, "UI closed before analysis finished");
        }
    });
}

/// Handle keyboard input
/// Layered dispatch: Modal → Global → View-specific → Overlay/Component
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    // Layer 1: Modal captures all input when active
    if handle_modal_input(app, &key_event) {
        return;
    }

    match key_event.kind {
        KeyEventKind::Press => {}
        KeyEventKind::Release => {
            app.handle_key_release(key_event.code);
            return;
        }
        _ => return,
    }

    if !app.handle_key_press(key_event.code) {
        return;
    }

    // Layer 2: Global keys
    if handle_global_keys(app, &key_event) {
        return;
    }

    // Layer 3: View action keys (only without an overlay)
    if !app.overlay_open() && handle_view_keys(app, &key_event) {
        return;
    }

    // Layer 4: Overlay or focused panel
    app.dispatch_to_active(key_event);
}

/// Handle modal input - returns true if modal absorbed the input
fn handle_modal_input(app: &mut App, key_event: &KeyEvent) -> bool {
    let Some(ref mut modal) = app.modal else {
        return false;
    };

    // Release events still reach the InputHandler so keys don't stick
    if key_event.kind == KeyEventKind::Release {
        app.handle_key_release(key_event.code);
        return true;
    }
    if key_event.kind != KeyEventKind::Press {
        return true;
    }

    match modal.handle_input(key_event.code) {
        ModalAction::None => {}
        ModalAction::Close => app.modal = None,
        ModalAction::Copy => app.copy_alert(),
    }
    true
}

/// Handle global keys - returns true if handled.
/// While an overlay owns the keyboard only quit gets through.
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    let key = key_event.code;

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
        app.should_quit = true;
        return true;
    }

    if app.overlay_open() {
        if key == KeyCode::Char('q') {
            app.should_quit = true;
            return true;
        }
        return false;
    }

    match key {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::F(1) | KeyCode::Char('h') => app.set_view(View::Home),
        KeyCode::F(2) | KeyCode::Char('a') => app.set_view(View::About),
        KeyCode::F(3) | KeyCode::Char('c') => app.set_view(View::Contact),
        KeyCode::Char('?') => app.modal = Some(Modal::help()),
        KeyCode::Char('u') => app.open_upload(),
        KeyCode::Char('t') => app.cycle_theme(),
        KeyCode::Char('L') => app.toggle_logs(),
        KeyCode::Char('y') => app.copy_current(false),
        KeyCode::Char('Y') => app.copy_current(true),
        _ => return false,
    }
    true
}

/// Home view actions: start an upload, or leave the current result
fn handle_view_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    if app.view != View::Home {
        return false;
    }

    let invalid = app.result.as_ref().map(|r| r.is_invalid());
    match (invalid, key_event.code) {
        (None, KeyCode::Enter) => app.open_upload(),
        (Some(true), KeyCode::Enter) => app.retry(),
        (Some(_), KeyCode::Char('r') | KeyCode::Backspace) => app.reset_result(),
        _ => return false,
    }
    true
}
