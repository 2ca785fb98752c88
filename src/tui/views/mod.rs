// Views module - screen-level rendering
//
// - Home: hero and feature summary, or the held result
// - About: how the analysis pipeline works
// - Contact: team details
//
// Overlays are drawn on top in order: upload dialog, file picker, modal,
// toast.

mod about;
mod contact;
mod home;
mod modal;

use super::app::{App, View};
use crate::tui::components;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Height of the log panel when shown
const LOGS_HEIGHT: u16 = 10;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let mut constraints = vec![Constraint::Length(3), Constraint::Min(8)];
    if app.show_logs {
        constraints.push(Constraint::Length(LOGS_HEIGHT));
    }
    constraints.push(Constraint::Length(2));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    components::render_title(f, chunks[0], app);
    let content = chunks[1];
    if app.show_logs {
        components::render_logs_panel(f, chunks[2], app);
    }
    components::render_status(f, chunks[chunks.len() - 1], app);

    match app.view {
        View::Home => home::render(f, content, app),
        View::About => about::render(f, content, app),
        View::Contact => contact::render(f, content, app),
    }

    draw_overlays(f, content, app);

    if let Some(modal_state) = &app.modal {
        modal::render(f, modal_state, app);
    }

    if let Some(toast) = &app.toast {
        let area = f.area();
        toast.render(f, area, &app.theme);
    }

    app.clear_expired_toast();
}

fn draw_overlays(f: &mut Frame, area: Rect, app: &mut App) {
    if app.upload.is_open() {
        app.upload
            .render(f, area, &app.theme, app.spinner_char());
    }

    if let Some(picker) = app.picker.as_mut() {
        let picker_area = crate::tui::layout::centered(
            area,
            area.width.saturating_sub(8).min(80),
            area.height.saturating_sub(2),
        );
        picker.render(f, picker_area, &app.theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisResponse;
    use crate::config::Config;
    use crate::logging::LogBuffer;
    use crate::tui::components::ResultPanel;
    use crate::tui::modal::Modal;
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    fn draw_to_string(app: &mut App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal.draw(|f| draw(f, app)).expect("draw");
        terminal
            .backend()
            .buffer()
            .content
            .chunks(width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> App {
        App::with_config(LogBuffer::new(), Config::default())
    }

    #[test]
    fn home_shows_hero_without_result() {
        let mut app = app();
        let screen = draw_to_string(&mut app, 100, 32);
        assert!(screen.contains("Health-Decoded"));
        assert!(screen.contains("Medical clarity. Financial honesty."));
        assert!(screen.contains("ELI5 Decoder"));
    }

    #[test]
    fn home_shows_result_when_held() {
        let mut app = app();
        let response = AnalysisResponse::classify(Some(&json!({
            "bill_trust_score": 72,
            "audit_findings": [{"item": "MRI", "cost": 1200}]
        })));
        app.result = Some(ResultPanel::new(response, None));

        let screen = draw_to_string(&mut app, 100, 32);
        assert!(screen.contains("Billing Audit Results"));
        assert!(screen.contains("72/100"));
        assert!(!screen.contains("ELI5 Decoder"));
    }

    #[test]
    fn every_view_renders_on_a_small_terminal() {
        let mut app = app();
        for view in View::all() {
            app.set_view(*view);
            app.show_logs = true;
            let screen = draw_to_string(&mut app, 40, 20);
            assert!(!screen.is_empty());
        }
    }

    #[test]
    fn about_and_contact_content() {
        let mut app = app();
        app.set_view(View::About);
        let screen = draw_to_string(&mut app, 100, 32);
        assert!(screen.contains("Vision-Language Extraction"));

        app.set_view(View::Contact);
        let screen = draw_to_string(&mut app, 100, 32);
        assert!(screen.contains("syntaxkillers.dev@gmail.com"));
    }

    #[test]
    fn alert_draws_over_upload_dialog() {
        let mut app = app();
        app.open_upload();
        app.modal = Some(Modal::alert("Analysis failed: unreadable image"));

        let screen = draw_to_string(&mut app, 100, 32);
        assert!(screen.contains("Analysis failed: unreadable image"));
        assert!(screen.contains("Upload Document"));
    }
}
