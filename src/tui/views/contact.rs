// Contact view

use crate::tui::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(" Contact ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let label = Style::default().fg(theme.muted);
    let value = Style::default().fg(theme.foreground);
    let link = Style::default().fg(theme.highlight);

    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled("Created by", label)),
        Line::from(vec![
            Span::styled("Team ", Style::default().fg(theme.title).add_modifier(Modifier::BOLD)),
            Span::styled(
                "Syntax Killers",
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::raw(""),
        Line::from(Span::styled("Get in touch", label)),
        Line::from(Span::styled("syntaxkillers.dev@gmail.com", link)),
        Line::from(Span::styled("+919842561237", link)),
        Line::raw(""),
        Line::from(Span::styled("Based in", label)),
        Line::from(Span::styled("Ranchi, Jharkhand", value)),
        Line::raw(""),
        Line::from(Span::styled("Digital support available 24x7", label)),
        Line::raw(""),
        Line::from(Span::styled(
            "We do not store personal or medical data.",
            Style::default().fg(theme.note).add_modifier(Modifier::ITALIC),
        )),
    ];

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().bg(theme.background)),
        inner,
    );
}
