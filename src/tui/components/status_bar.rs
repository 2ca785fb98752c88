// Status bar component
//
// Backend, language, theme and the key hints of whatever has input focus.

use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let bp = Breakpoint::from_width(area.width);
    let hint = app.focus_hint();
    let language = app.upload.interaction().language();

    let status_text = match bp {
        Breakpoint::Compact => format!(" {} │ {}", language, hint),
        Breakpoint::Normal => format!(" 🌐 {} │ {} │ {}", language, app.theme.name, hint),
        Breakpoint::Wide => format!(
            " ⇄ {} │ 🌐 {} │ 🎨 {} │ {}",
            app.api_base_url(),
            language,
            app.theme.name,
            hint
        ),
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
