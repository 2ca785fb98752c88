// Title bar component
//
// App name, view tabs and a spinner while an analysis is in flight.

use crate::tui::app::{App, View};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let mut spans = vec![Span::styled(
        " ✚ Health-Decoded ",
        Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
    )];

    for (idx, view) in View::all().iter().enumerate() {
        let style = if *view == app.view {
            Style::default()
                .fg(theme.selection_fg)
                .bg(theme.selection)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" F{} {} ", idx + 1, view.name()), style));
    }

    if app.upload.interaction().is_busy() {
        spans.push(Span::styled(
            format!("   {} analyzing", app.spinner_char()),
            Style::default().fg(theme.highlight),
        ));
    }

    let title = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.title))
            .title_top(Line::from(" ? ").right_aligned()),
    );

    f.render_widget(title, area);
}
