//! Document preview panel
//!
//! Draws the uploaded image as upper-half-block cells: each cell carries two
//! vertical pixels, top as foreground and bottom as background.

use super::formatters::truncate;
use crate::analysis::{DocumentPreview, HalfBlockImage};
use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const UPPER_HALF: &str = "▀";

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}

/// Half-block rows, horizontally centered in `width` cells
pub fn thumbnail_lines(image: &HalfBlockImage, width: u16, theme: &Theme) -> Vec<Line<'static>> {
    let pad = width.saturating_sub(image.width) / 2;

    (0..image.height)
        .map(|y| {
            let mut spans = Vec::with_capacity(image.width as usize + 1);
            if pad > 0 {
                spans.push(Span::raw(" ".repeat(pad as usize)));
            }
            spans.extend(image.row(y).iter().map(|cell| {
                let bg = cell.bottom.map(rgb).unwrap_or(theme.background);
                Span::styled(UPPER_HALF, Style::default().fg(rgb(cell.top)).bg(bg))
            }));
            Line::from(spans)
        })
        .collect()
}

pub fn render(f: &mut Frame, area: Rect, preview: &DocumentPreview, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(" Preview ")
        .title_bottom(Line::from(" p:hide ").right_aligned());
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let mut lines = vec![Line::from(Span::styled(
        truncate(&preview.describe(), inner.width as usize),
        Style::default().fg(theme.muted),
    ))];

    match preview.thumbnail(inner.width, inner.height.saturating_sub(1)) {
        Some(image) => lines.extend(thumbnail_lines(&image, inner.width, theme)),
        None => {
            let note = if preview.is_decoded() {
                "Too small to preview"
            } else {
                "Preview unavailable for this file"
            };
            lines.push(Line::from(Span::styled(note, Style::default().fg(theme.muted))));
        }
    }

    f.render_widget(
        Paragraph::new(lines).style(Style::default().bg(theme.background)),
        inner,
    );
}
