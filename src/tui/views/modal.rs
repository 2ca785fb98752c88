// Modal overlay rendering
//
// Modals are rendered on top of everything else:
// - Help modal: keyboard shortcuts and current theme
// - Alert modal: analysis failures, acknowledged with Enter

use crate::tui::app::App;
use crate::tui::components::formatters::wrap_text;
use crate::tui::layout::centered;
use crate::tui::modal::Modal;
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, modal: &Modal, app: &App) {
    match modal {
        Modal::Help => render_help(f, app),
        Modal::Alert(message) => render_alert(f, app, message),
    }
}

fn render_help(f: &mut Frame, app: &App) {
    let key_style = Style::default().fg(app.theme.highlight);
    let desc_style = Style::default().fg(app.theme.foreground);
    let header_style = Style::default()
        .fg(app.theme.title)
        .add_modifier(Modifier::BOLD);

    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Views", header_style)),
        kb("F1, h", "Home"),
        kb("F2, a", "How it works"),
        kb("F3, c", "Contact"),
        Line::raw(""),
        Line::from(Span::styled("  Analysis", header_style)),
        kb("u, Enter", "Upload a document"),
        kb("1 / 2", "Report or bill"),
        kb("←/→", "Change language"),
        kb("r", "New analysis"),
        kb("p", "Toggle preview"),
        Line::raw(""),
        Line::from(Span::styled("  Navigation", header_style)),
        kb("↑/↓, j/k", "Scroll"),
        kb("PgUp/PgDn", "Page"),
        kb("Esc", "Close / go back"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("y / Y", "Copy text / JSON"),
        kb("t", "Next theme"),
        kb("L", "Toggle logs"),
        kb("?", "Toggle this help"),
        kb("q", "Quit"),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Theme: ", desc_style),
            Span::styled(app.theme.name.clone(), key_style),
        ]),
    ]);

    let area = centered(f.area(), 44, 31);
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(app.theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.highlight))
                .border_type(app.theme.border_type)
                .title(" Help ")
                .title_bottom(Line::from(" Press ? or Esc to close ").centered()),
        );
    f.render_widget(paragraph, area);
}

fn render_alert(f: &mut Frame, app: &App, message: &str) {
    let width = 60.min(f.area().width);
    let text_width = width.saturating_sub(4) as usize;
    let wrapped = wrap_text(message, text_width);

    let mut lines = vec![Line::raw("")];
    lines.extend(wrapped.into_iter().map(|l| {
        Line::from(Span::styled(l, Style::default().fg(app.theme.foreground)))
            .alignment(Alignment::Center)
    }));
    lines.push(Line::raw(""));

    let height = lines.len() as u16 + 2;
    let area = centered(f.area(), width, height);
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(app.theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.abnormal))
                .border_type(app.theme.border_type)
                .title(" Something went wrong ")
                .title_bottom(Line::from(" Enter:OK  y:copy ").centered()),
        );
    f.render_widget(paragraph, area);
}
