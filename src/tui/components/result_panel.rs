//! Result panel component
//!
//! Owns the analysis the shell is currently showing: the classified
//! response, its terminal-independent `ResultView`, the optional document
//! preview and a scroll position. Styling happens here; deciding what to
//! show happens in `crate::render`.

use super::formatters::wrap_text;
use super::preview;
use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::analysis::{AnalysisResponse, DocumentPreview};
use crate::render::{
    self, Emphasis, ResultView, Trailing, BILL_TITLE, INVALID_MESSAGE, INVALID_TITLE,
    REMINDER_TITLE, REPORT_TITLE, RETRY_LABEL, SAVINGS_TITLE,
};
use crate::theme::Theme;
use crate::tui::layout::Breakpoint;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{Copyable, Handled, Interactive, Scrollable};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows given to the preview when it is stacked above the result
const STACKED_PREVIEW_ROWS: u16 = 12;

pub struct ResultPanel {
    response: AnalysisResponse,
    view: ResultView,
    preview: Option<DocumentPreview>,
    show_preview: bool,
    scroll: ScrollState,
}

impl ResultPanel {
    pub fn new(response: AnalysisResponse, preview: Option<DocumentPreview>) -> Self {
        let view = render::render(Some(&response));
        Self {
            response,
            view,
            preview,
            show_preview: false,
            scroll: ScrollState::manual(),
        }
    }

    pub fn response(&self) -> &AnalysisResponse {
        &self.response
    }

    pub fn view(&self) -> &ResultView {
        &self.view
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self.view, ResultView::Invalid)
    }

    pub fn preview(&self) -> Option<&DocumentPreview> {
        self.preview.as_ref()
    }

    pub fn is_preview_shown(&self) -> bool {
        self.show_preview && self.preview.is_some()
    }

    /// Show or hide the preview. No-op without one.
    pub fn toggle_preview(&mut self) {
        if self.preview.is_some() {
            self.show_preview = !self.show_preview;
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let (result_area, preview_area) = self.split(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.highlight))
            .title(format!(" {} ", self.title()))
            .title_bottom(Line::from(format!(" {} ", self.bottom_hint())).centered());
        let inner = block.inner(result_area);
        f.render_widget(block, result_area);

        // One column reserved for the scrollbar
        let lines = styled_lines(&self.view, inner.width.saturating_sub(2) as usize, theme);
        self.scroll
            .update_dimensions(lines.len(), inner.height as usize);
        let (start, end) = self.scroll.visible_range();
        let visible: Vec<Line> = lines.into_iter().skip(start).take(end - start).collect();

        f.render_widget(
            Paragraph::new(visible).style(Style::default().bg(theme.background)),
            inner,
        );
        render_scrollbar(f, result_area, &self.scroll, ScrollbarStyle::Arrows);

        if let (Some(area), Some(doc)) = (preview_area, self.preview.as_ref()) {
            preview::render(f, area, doc, theme);
        }
    }

    /// Preview beside the result on wide terminals, above it otherwise
    fn split(&self, area: Rect) -> (Rect, Option<Rect>) {
        if !self.is_preview_shown() {
            return (area, None);
        }

        if Breakpoint::from_width(area.width).at_least(Breakpoint::Wide) {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(area);
            (chunks[0], Some(chunks[1]))
        } else {
            let rows = STACKED_PREVIEW_ROWS.min(area.height / 2);
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(rows), Constraint::Min(3)])
                .split(area);
            (chunks[1], Some(chunks[0]))
        }
    }

    fn title(&self) -> &'static str {
        match self.view {
            ResultView::Invalid => INVALID_TITLE,
            ResultView::Report(_) => REPORT_TITLE,
            ResultView::Bill(_) => BILL_TITLE,
        }
    }

    fn bottom_hint(&self) -> &'static str {
        match (&self.view, self.preview.is_some()) {
            (ResultView::Invalid, _) => "Enter:try again  r:back",
            (_, true) => "↑↓:scroll  p:preview  y:copy  r:new analysis",
            (_, false) => "↑↓:scroll  y:copy  r:new analysis",
        }
    }
}

impl Scrollable for ResultPanel {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Interactive for ResultPanel {
    /// Reset, retry and copy are App concerns and bubble up
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        if key.code == KeyCode::Char('p') && self.preview.is_some() {
            self.toggle_preview();
            return Handled::Yes;
        }
        self.handle_scroll_keys(key.code)
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some(self.bottom_hint())
    }
}

impl Copyable for ResultPanel {
    fn copy_text(&self) -> Option<String> {
        Some(render::to_plain_text(&self.view))
    }

    fn copy_data(&self) -> Option<String> {
        serde_json::to_string_pretty(&self.response).ok()
    }

    fn copy_description(&self) -> &'static str {
        "analysis"
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Styling
// ═══════════════════════════════════════════════════════════════════════════

/// Wrapped, styled lines for a view at the given text width
pub fn styled_lines(view: &ResultView, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let mut out = Lines::new(width.max(10));
    let body = Style::default().fg(theme.foreground);
    let muted = Style::default().fg(theme.muted);
    let heading = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

    match view {
        ResultView::Invalid => {
            out.blank();
            out.text(INVALID_TITLE, 1, heading(theme.abnormal));
            out.blank();
            out.text(INVALID_MESSAGE, 1, body);
            out.blank();
            out.raw(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    format!("[ {} ]", RETRY_LABEL),
                    Style::default()
                        .fg(theme.selection_fg)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("  Enter", muted),
            ]));
        }
        ResultView::Report(report) => {
            out.blank();
            out.text(&report.summary, 1, body);
            out.blank();

            for row in &report.rows {
                let (marker, color) = match row.emphasis {
                    Emphasis::Normal => ("●", theme.normal),
                    Emphasis::Abnormal => ("▲", theme.abnormal),
                };
                out.raw(Line::from(vec![
                    Span::styled(format!(" {} ", marker), Style::default().fg(color)),
                    Span::styled(row.parameter.clone(), body.add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  {}", row.value), body),
                    Span::styled(
                        format!("  [{}]", status_label(&row.status)),
                        Style::default().fg(color),
                    ),
                ]));
                if !row.explanation.is_empty() {
                    out.text(&row.explanation, 5, muted);
                }
            }

            trailing_lines(&mut out, &report.trailing, theme);
        }
        ResultView::Bill(bill) => {
            out.blank();
            out.raw(Line::from(vec![
                Span::styled(" Bill Trust Score: ", body),
                Span::styled(bill.score_line.clone(), heading(theme.score)),
            ]));
            out.blank();

            for row in &bill.rows {
                out.raw(Line::from(vec![
                    Span::styled(" ▸ ", Style::default().fg(theme.issue)),
                    Span::styled(row.item.clone(), body.add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  {}", row.cost), Style::default().fg(theme.score)),
                ]));
                if !row.issue.is_empty() {
                    out.text(&row.issue, 5, Style::default().fg(theme.issue));
                }
                if !row.action.is_empty() {
                    out.text(&format!("Recommendation: {}", row.action), 5, muted);
                }
            }

            if let Some(savings) = &bill.savings {
                out.blank();
                out.text(SAVINGS_TITLE, 1, heading(theme.savings));
                for alt in savings {
                    out.text(
                        &format!(
                            "Switch from {} to {}, save approx {}",
                            alt.branded, alt.generic, alt.estimated_savings
                        ),
                        3,
                        Style::default().fg(theme.savings),
                    );
                }
            }

            trailing_lines(&mut out, &bill.trailing, theme);
        }
    }

    out.lines
}

fn trailing_lines(out: &mut Lines, trailing: &Trailing, theme: &Theme) {
    if let Some(questions) = &trailing.questions {
        out.blank();
        out.text(
            &questions.heading,
            1,
            Style::default()
                .fg(theme.questions)
                .add_modifier(Modifier::BOLD),
        );
        for q in &questions.items {
            out.text(&format!("☐ {}", q), 3, Style::default().fg(theme.questions));
        }
    }

    if let Some(reminder) = &trailing.gentle_reminder {
        out.blank();
        out.text(
            REMINDER_TITLE,
            1,
            Style::default()
                .fg(theme.reminder)
                .add_modifier(Modifier::BOLD),
        );
        out.text(reminder, 3, Style::default().fg(theme.reminder));
    }

    out.blank();
    out.text(
        &format!("ⓘ {}", trailing.safety_note),
        1,
        Style::default()
            .fg(theme.note)
            .add_modifier(Modifier::ITALIC),
    );
}

fn status_label(status: &str) -> &str {
    if status.trim().is_empty() {
        "no status"
    } else {
        status
    }
}

/// Accumulates wrapped lines at a fixed width
struct Lines {
    width: usize,
    lines: Vec<Line<'static>>,
}

impl Lines {
    fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
        }
    }

    fn blank(&mut self) {
        self.lines.push(Line::raw(""));
    }

    fn raw(&mut self, line: Line<'static>) {
        self.lines.push(line);
    }

    fn text(&mut self, text: &str, indent: usize, style: Style) {
        let pad = " ".repeat(indent);
        for chunk in wrap_text(text, self.width.saturating_sub(indent)) {
            self.lines
                .push(Line::from(Span::styled(format!("{}{}", pad, chunk), style)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::InvalidReason;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn report() -> AnalysisResponse {
        AnalysisResponse::classify(Some(&json!({
            "summary": "Your blood test is mostly fine.",
            "findings": [
                {"parameter": "Hemoglobin", "value": "10.2 g/dL", "status": "Low",
                 "explanation": "Slightly below the usual range."},
                {"parameter": "Platelets", "value": "250k", "status": "NORMAL", "explanation": ""}
            ],
            "questions_for_doctor": ["Should I take iron supplements?"]
        })))
    }

    fn bill() -> AnalysisResponse {
        AnalysisResponse::classify(Some(&json!({
            "bill_trust_score": 72,
            "audit_findings": [
                {"item": "Room charge", "cost": "$900", "issue_detected": "Billed twice",
                 "suggested_action": "Ask for an itemized bill"}
            ],
            "savings_opportunity": {
                "detected": true,
                "generic_alternatives": [
                    {"branded": "Crocin", "generic": "Paracetamol", "estimated_savings": "$4"}
                ]
            }
        })))
    }

    fn screen_text(panel: &mut ResultPanel, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("terminal");
        let theme = Theme::default();
        terminal
            .draw(|f| {
                let area = f.area();
                panel.render(f, area, &theme)
            })
            .expect("draw");
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content
            .chunks(width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn report_rows_keep_order_and_emphasis_colors() {
        let theme = Theme::default();
        let panel = ResultPanel::new(report(), None);
        let lines = styled_lines(panel.view(), 60, &theme);

        let rows: Vec<&Line> = lines
            .iter()
            .filter(|l| l.spans.first().is_some_and(|s| s.content.contains('●') || s.content.contains('▲')))
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].spans[1].content, "Hemoglobin");
        assert_eq!(rows[0].spans[0].style.fg, Some(theme.abnormal));
        assert_eq!(rows[1].spans[1].content, "Platelets");
        assert_eq!(rows[1].spans[0].style.fg, Some(theme.normal));
    }

    #[test]
    fn bill_renders_score_and_savings() {
        let mut panel = ResultPanel::new(bill(), None);
        let screen = screen_text(&mut panel, 90, 30);

        assert!(screen.contains(BILL_TITLE));
        assert!(screen.contains("Bill Trust Score: 72/100"));
        assert!(screen.contains("Room charge"));
        assert!(screen.contains(SAVINGS_TITLE));
        assert!(screen.contains("Switch from Crocin to Paracetamol"));
    }

    #[test]
    fn invalid_panel_offers_retry() {
        let mut panel = ResultPanel::new(AnalysisResponse::Invalid(InvalidReason::NoDiscriminant), None);
        assert!(panel.is_invalid());

        let screen = screen_text(&mut panel, 80, 20);
        assert!(screen.contains(INVALID_TITLE));
        assert!(screen.contains(RETRY_LABEL));
        assert!(!screen.contains(REPORT_TITLE));
    }

    #[test]
    fn preview_toggle_requires_a_preview() {
        let mut panel = ResultPanel::new(report(), None);
        assert_eq!(panel.handle_key(key(KeyCode::Char('p'))), Handled::No);
        assert!(!panel.is_preview_shown());
    }

    #[test]
    fn scrolls_long_results() {
        let mut panel = ResultPanel::new(report(), None);
        // Small enough that the content overflows
        screen_text(&mut panel, 40, 8);
        assert_eq!(panel.scroll_offset(), 0);

        assert_eq!(panel.handle_key(key(KeyCode::Down)), Handled::Yes);
        assert_eq!(panel.scroll_offset(), 1);
        assert_eq!(panel.handle_key(key(KeyCode::Char('r'))), Handled::No);
    }

    #[test]
    fn copies_plain_text_and_json() {
        let panel = ResultPanel::new(bill(), None);
        let text = panel.copy_text().expect("text");
        assert!(text.starts_with(BILL_TITLE));

        let data = panel.copy_data().expect("json");
        let value: serde_json::Value = serde_json::from_str(&data).expect("valid json");
        assert_eq!(value["kind"], "bill");
    }
}
