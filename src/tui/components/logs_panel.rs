//! Logs panel component
//!
//! Shows the in-memory log buffer at the bottom of the screen, toggled
//! with `L`. Auto-follows new entries until the user scrolls up.

use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::logging::{LogEntry, LogLevel};
use crate::theme::Theme;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{Copyable, Handled, Interactive, Scrollable};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub struct LogsPanel {
    scroll: ScrollState,
    /// Formatted entries from the last sync, kept for clipboard copy
    lines: Vec<(LogLevel, String)>,
}

impl LogsPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::new(),
            lines: Vec::new(),
        }
    }

    /// Pull the current buffer contents. Called each frame the panel is shown.
    pub fn sync_entries(&mut self, entries: &[LogEntry], viewport_height: usize) {
        self.lines = entries
            .iter()
            .map(|e| (e.level, format_log_entry(e)))
            .collect();
        self.scroll
            .update_dimensions(self.lines.len(), viewport_height);
    }

    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let (start, end) = self.scroll.visible_range();

        let items: Vec<ListItem> = self.lines[start..end]
            .iter()
            .map(|(level, text)| ListItem::new(text.as_str()).style(log_level_style(*level, theme)))
            .collect();

        let title = if self.scroll.auto_follow {
            " System Logs "
        } else {
            " System Logs [scroll] "
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.border))
                .title(title),
        );

        f.render_widget(list, area);
        render_scrollbar(f, area, &self.scroll, ScrollbarStyle::Minimal);
    }
}

impl Default for LogsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Scrollable for LogsPanel {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Interactive for LogsPanel {
    /// Only paging keys, so arrows keep scrolling the result above
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::PageUp | KeyCode::PageDown => self.handle_scroll_keys(key.code),
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("PgUp/PgDn:logs  Y:copy logs")
    }
}

impl Copyable for LogsPanel {
    fn copy_text(&self) -> Option<String> {
        if self.lines.is_empty() {
            return None;
        }
        Some(
            self.lines
                .iter()
                .map(|(_, text)| text.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }

    fn copy_description(&self) -> &'static str {
        "logs"
    }
}

fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

fn log_level_style(level: LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(theme.abnormal)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.score),
        LogLevel::Info => Style::default().fg(theme.foreground),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.muted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use crossterm::event::KeyModifiers;

    fn entries(n: usize) -> Vec<LogEntry> {
        (0..n)
            .map(|i| LogEntry {
                timestamp: Local::now(),
                level: if i % 2 == 0 { LogLevel::Info } else { LogLevel::Warn },
                target: "test".to_string(),
                message: format!("line {}", i),
            })
            .collect()
    }

    #[test]
    fn follows_newest_until_paged_up() {
        let mut panel = LogsPanel::new();
        panel.sync_entries(&entries(20), 5);
        assert_eq!(panel.visible_range(), (15, 20));

        let handled = panel.handle_key(KeyEvent::new(KeyCode::PageUp, KeyModifiers::NONE));
        assert_eq!(handled, Handled::Yes);
        panel.sync_entries(&entries(25), 5);
        assert_eq!(panel.visible_range(), (10, 15));
    }

    #[test]
    fn arrows_are_left_for_the_view() {
        let mut panel = LogsPanel::new();
        let handled = panel.handle_key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE));
        assert_eq!(handled, Handled::No);
    }

    #[test]
    fn copy_joins_formatted_lines() {
        let mut panel = LogsPanel::new();
        assert_eq!(panel.copy_text(), None);

        panel.sync_entries(&entries(2), 5);
        let text = panel.copy_text().expect("text");
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("WARN  line 1"));
    }
}
