//! Upload dialog component
//!
//! Overlay over the `UploadInteraction` state machine. Idle, it offers the
//! two document categories and the language selector; busy, it shows a
//! spinner until the background request reports back.

use super::formatters::truncate;
use crate::analysis::{Category, Language};
use crate::theme::Theme;
use crate::tui::layout::centered;
use crate::tui::traits::{Handled, Interactive};
use crate::upload::UploadInteraction;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub struct UploadDialog {
    interaction: UploadInteraction,
    /// Category row under the cursor
    highlighted: usize,
    /// Set when a category was accepted; App opens the file picker
    pick_requested: bool,
}

impl UploadDialog {
    pub fn new(language: Language) -> Self {
        Self {
            interaction: UploadInteraction::new(language),
            highlighted: 0,
            pick_requested: false,
        }
    }

    pub fn interaction(&self) -> &UploadInteraction {
        &self.interaction
    }

    pub fn interaction_mut(&mut self) -> &mut UploadInteraction {
        &mut self.interaction
    }

    pub fn is_open(&self) -> bool {
        self.interaction.is_open()
    }

    pub fn open(&mut self) {
        if !self.interaction.is_open() {
            self.highlighted = 0;
            self.pick_requested = false;
        }
        self.interaction.open();
    }

    pub fn dismiss(&mut self) {
        self.pick_requested = false;
        self.interaction.dismiss();
    }

    /// True once after a category was accepted
    pub fn take_pick_request(&mut self) -> bool {
        std::mem::take(&mut self.pick_requested)
    }

    fn choose(&mut self, category: Category) {
        if let Some(idx) = Category::all().iter().position(|c| *c == category) {
            self.highlighted = idx;
        }
        if self.interaction.select_category(category) {
            self.pick_requested = true;
        }
    }

    /// `spinner` is the shell's current animation glyph
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, spinner: char) {
        let dialog = centered(area, 56, 14);
        f.render_widget(Clear, dialog);

        let lines = if self.interaction.is_busy() {
            self.busy_lines(theme, spinner, dialog.width.saturating_sub(4) as usize)
        } else {
            self.idle_lines(theme)
        };

        let hint = if self.interaction.is_busy() {
            " Esc:cancel "
        } else {
            " 1/2:choose  ←→:language  Esc:close "
        };

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .style(Style::default().bg(theme.background).fg(theme.foreground))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(theme.border_type)
                    .border_style(Style::default().fg(theme.highlight))
                    .title(" Upload Document ")
                    .title_bottom(Line::from(hint).centered()),
            );
        f.render_widget(paragraph, dialog);
    }

    fn idle_lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        let muted = Style::default().fg(theme.muted);
        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled("  What are you uploading?", muted)),
            Line::raw(""),
        ];

        for (idx, category) in Category::all().iter().enumerate() {
            let selected = idx == self.highlighted;
            let style = if selected {
                Style::default()
                    .fg(theme.selection_fg)
                    .bg(theme.selection)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.foreground)
            };
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!(" {}  {} ", idx + 1, category.label()), style),
            ]));
            lines.push(Line::from(Span::styled(
                format!("       {}", category.blurb()),
                muted,
            )));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("  Language: ", muted),
            Span::styled("◀ ", Style::default().fg(theme.highlight)),
            Span::styled(
                self.interaction.language().to_string(),
                Style::default()
                    .fg(theme.foreground)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ▶", Style::default().fg(theme.highlight)),
        ]));
        lines
    }

    fn busy_lines(&self, theme: &Theme, spinner: char, width: usize) -> Vec<Line<'static>> {
        let noun = self
            .interaction
            .busy_category()
            .map(Category::noun)
            .unwrap_or("document");
        let file = self.interaction.busy_file_name().unwrap_or_default();
        let elapsed = self.interaction.busy_elapsed_secs().unwrap_or(0);

        let lines = vec![
            Line::raw(""),
            Line::raw(""),
            Line::from(Span::styled(
                format!("{}  Decoding Document...", spinner),
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            Line::from(Span::styled(
                format!("Our AI is processing your {}", noun.to_lowercase()),
                Style::default().fg(theme.foreground),
            )),
            Line::from(Span::styled(
                format!("{} · {}s", truncate(file, width.saturating_sub(8)), elapsed),
                Style::default().fg(theme.muted),
            )),
        ];
        lines
            .into_iter()
            .map(|l| l.alignment(Alignment::Center))
            .collect()
    }
}

impl Interactive for UploadDialog {
    /// Esc bubbles up so App can dismiss and clean up the picker
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        if self.interaction.is_busy() {
            return Handled::No;
        }

        let count = Category::all().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.highlighted = (self.highlighted + count - 1) % count;
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.highlighted = (self.highlighted + 1) % count;
            }
            KeyCode::Enter => {
                if let Some(category) = Category::all().get(self.highlighted).copied() {
                    self.choose(category);
                }
            }
            KeyCode::Char('1') | KeyCode::Char('r') => self.choose(Category::MedicalReport),
            KeyCode::Char('2') | KeyCode::Char('b') => self.choose(Category::MedicalBill),
            KeyCode::Left | KeyCode::Char('h') => {
                let prev = self.interaction.language().prev();
                self.interaction.select_language(prev);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                let next = self.interaction.language().next();
                self.interaction.select_language(next);
            }
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> Option<&'static str> {
        if self.interaction.is_busy() {
            Some("Analyzing...  Esc:cancel")
        } else {
            Some("1:report  2:bill  ←→:language  Esc:close")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SelectedFile;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn open_dialog() -> UploadDialog {
        let mut dialog = UploadDialog::new(Language::English);
        dialog.open();
        dialog
    }

    #[test]
    fn choosing_a_category_requests_the_picker_once() {
        let mut dialog = open_dialog();
        assert_eq!(dialog.handle_key(key(KeyCode::Char('2'))), Handled::Yes);
        assert_eq!(dialog.interaction().category(), Some(Category::MedicalBill));
        assert!(dialog.take_pick_request());
        assert!(!dialog.take_pick_request());
    }

    #[test]
    fn enter_chooses_highlighted_category() {
        let mut dialog = open_dialog();
        dialog.handle_key(key(KeyCode::Down));
        dialog.handle_key(key(KeyCode::Down));
        dialog.handle_key(key(KeyCode::Enter));
        assert_eq!(dialog.interaction().category(), Some(Category::MedicalReport));
    }

    #[test]
    fn arrows_cycle_language() {
        let mut dialog = open_dialog();
        dialog.handle_key(key(KeyCode::Right));
        assert_eq!(dialog.interaction().language(), Language::Hindi);
        dialog.handle_key(key(KeyCode::Left));
        dialog.handle_key(key(KeyCode::Left));
        assert_eq!(dialog.interaction().language(), Language::French);
    }

    #[test]
    fn busy_dialog_ignores_input_and_shows_spinner() {
        let mut dialog = open_dialog();
        dialog.handle_key(key(KeyCode::Char('1')));
        let submission = dialog
            .interaction_mut()
            .submit(SelectedFile::from_bytes("cbc.png", vec![1, 2, 3]));
        assert!(submission.is_some());

        assert_eq!(dialog.handle_key(key(KeyCode::Char('2'))), Handled::No);
        assert_eq!(dialog.handle_key(key(KeyCode::Right)), Handled::No);
        assert_eq!(dialog.interaction().language(), Language::English);
        assert_eq!(dialog.interaction().category(), Some(Category::MedicalReport));

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).expect("terminal");
        let theme = Theme::default();
        terminal
            .draw(|f| {
                let area = f.area();
                dialog.render(f, area, &theme, '◑')
            })
            .expect("draw");
        let screen: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(screen.contains("◑  Decoding Document..."));
        assert!(screen.contains("processing your report"));
    }

    #[test]
    fn esc_bubbles_to_app() {
        let mut dialog = open_dialog();
        assert_eq!(dialog.handle_key(key(KeyCode::Esc)), Handled::No);
    }
}
