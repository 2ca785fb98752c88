// Home view - hero and feature summary, or the held result

use crate::tui::app::App;
use crate::tui::components::formatters::wrap_text;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const FEATURES: [(&str, &str); 3] = [
    (
        "ELI5 Decoder",
        "Turns intimidating lab values and pathology reports into plain language.",
    ),
    (
        "Bill Auditor",
        "Scans hospital bills for overcharges, duplicate billing and unbundling.",
    ),
    (
        "Privacy Shield",
        "Personal details are scrubbed before AI processing. Nothing is stored.",
    ),
];

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    if let Some(result) = app.result.as_mut() {
        result.render(f, area, &app.theme);
        return;
    }

    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = inner.width.saturating_sub(4).min(72) as usize;
    let muted = Style::default().fg(theme.muted);

    let mut lines = vec![
        Line::raw(""),
        Line::from(Span::styled("Healthcare transparency", muted)),
        Line::raw(""),
        Line::from(Span::styled(
            "Medical clarity. Financial honesty.",
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
    ];
    let pitch = "We translate medical jargon into simple terms and audit hospital bills \
                 for errors, so you stay in control of your health and your wallet.";
    lines.extend(
        wrap_text(pitch, width)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(theme.foreground)))),
    );
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled(
            " Enter ",
            Style::default()
                .fg(theme.selection_fg)
                .bg(theme.selection)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Analyze my document", Style::default().fg(theme.highlight)),
    ]));
    lines.push(Line::raw(""));

    for (title, desc) in FEATURES {
        lines.push(Line::from(Span::styled(
            title,
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        )));
        lines.extend(
            wrap_text(desc, width)
                .into_iter()
                .map(|l| Line::from(Span::styled(l, muted))),
        );
        lines.push(Line::raw(""));
    }

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().bg(theme.background)),
        inner,
    );
}
