// How it works view

use crate::tui::app::App;
use crate::tui::components::formatters::wrap_text;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const STEPS: [(&str, &str, &str); 3] = [
    (
        "01",
        "Vision-Language Extraction",
        "Vision-language models identify the structure of medical tables, blood work \
         ranges and handwritten doctor notes rather than just reading text.",
    ),
    (
        "02",
        "On-the-Fly Redaction",
        "Personally identifiable information is scrubbed with local rules before the \
         data reaches any secondary processing.",
    ),
    (
        "03",
        "Jargon Translation",
        "Values are cross-referenced with medical references so 'Leukocytosis' becomes \
         'Elevated white blood cell count'.",
    ),
];

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(" How it works ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let indent = "     ";
    let width = (inner.width as usize).saturating_sub(indent.len() + 2);

    let mut lines = vec![Line::raw("")];
    for (step, title, desc) in STEPS {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {}  ", step),
                Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                title,
                Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
            ),
        ]));
        for line in wrap_text(desc, width) {
            lines.push(Line::from(Span::styled(
                format!("{}{}", indent, line),
                Style::default().fg(theme.foreground),
            )));
        }
        lines.push(Line::raw(""));
    }

    f.render_widget(
        Paragraph::new(lines).style(Style::default().bg(theme.background)),
        inner,
    );
}
