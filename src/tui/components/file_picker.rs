//! File picker component
//!
//! Terminal stand-in for a browser file dialog. Lists sub-directories and
//! image files of one directory at a time; hidden entries are skipped.
//! Picking a file records its path; App loads and sniffs it.

use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::analysis::format_size;
use crate::theme::Theme;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{Handled, Interactive};
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};
use std::path::{Path, PathBuf};

/// Extensions listed by the picker. Content is sniffed again on pick.
const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff", "heic", "heif",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEntry {
    /// ".." row, present unless at the filesystem root
    Parent,
    Dir(String),
    File { name: String, size: u64 },
}

impl PickerEntry {
    fn label(&self) -> String {
        match self {
            PickerEntry::Parent => "../".to_string(),
            PickerEntry::Dir(name) => format!("{}/", name),
            PickerEntry::File { name, .. } => name.clone(),
        }
    }
}

pub fn is_image_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

pub struct FilePicker {
    dir: PathBuf,
    entries: Vec<PickerEntry>,
    selected: usize,
    scroll: ScrollState,
    /// Last directory read failure, shown in the title
    error: Option<String>,
    chosen: Option<PathBuf>,
}

impl FilePicker {
    /// Open at `dir`, falling back to an empty listing if it cannot be read
    pub fn open(dir: PathBuf) -> Self {
        let mut picker = Self {
            dir,
            entries: Vec::new(),
            selected: 0,
            scroll: ScrollState::manual(),
            error: None,
            chosen: None,
        };
        picker.refresh();
        picker
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[PickerEntry] {
        &self.entries
    }

    pub fn selected(&self) -> Option<&PickerEntry> {
        self.entries.get(self.selected)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Path picked with Enter, handed over once
    pub fn take_chosen(&mut self) -> Option<PathBuf> {
        self.chosen.take()
    }

    fn refresh(&mut self) {
        self.selected = 0;
        self.scroll.scroll_to_top();
        match read_entries(&self.dir) {
            Ok(entries) => {
                self.entries = entries;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(dir = %self.dir.display(), error = %e, "Cannot list directory");
                self.entries = parent_row(&self.dir);
                self.error = Some(format!("{:#}", e));
            }
        }
    }

    fn enter_dir(&mut self, dir: PathBuf) {
        self.dir = dir;
        self.refresh();
    }

    pub fn go_parent(&mut self) {
        if let Some(parent) = self.dir.parent().map(Path::to_path_buf) {
            let previous = self
                .dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned());
            self.enter_dir(parent);
            // Land on the directory we just left
            if let Some(previous) = previous {
                if let Some(idx) = self
                    .entries
                    .iter()
                    .position(|e| matches!(e, PickerEntry::Dir(name) if *name == previous))
                {
                    self.selected = idx;
                }
            }
        }
    }

    fn activate(&mut self) {
        match self.entries.get(self.selected).cloned() {
            Some(PickerEntry::Parent) => self.go_parent(),
            Some(PickerEntry::Dir(name)) => {
                let dir = self.dir.join(name);
                self.enter_dir(dir);
            }
            Some(PickerEntry::File { name, .. }) => self.chosen = Some(self.dir.join(name)),
            None => {}
        }
    }

    fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    /// Keep the selected row inside the viewport
    fn follow_selection(&mut self, viewport: usize) {
        self.scroll.update_dimensions(self.entries.len(), viewport);
        if self.entries.is_empty() || viewport == 0 {
            return;
        }
        let (start, end) = self.scroll.visible_range();
        if self.selected < start {
            for _ in self.selected..start {
                self.scroll.scroll_up();
            }
        } else if self.selected >= end {
            for _ in end..=self.selected {
                self.scroll.scroll_down();
            }
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        f.render_widget(Clear, area);

        let viewport = area.height.saturating_sub(2) as usize;
        self.follow_selection(viewport);
        let (start, end) = self.scroll.visible_range();

        let items: Vec<ListItem> = self.entries[start..end]
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if start + i == self.selected {
                    Style::default()
                        .fg(theme.selection_fg)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD)
                } else {
                    match entry {
                        PickerEntry::File { .. } => Style::default().fg(theme.foreground),
                        _ => Style::default().fg(theme.highlight),
                    }
                };
                let mut spans = vec![Span::styled(format!(" {}", entry.label()), style)];
                if let PickerEntry::File { size, .. } = entry {
                    spans.push(Span::styled(
                        format!("  {}", format_size(*size as usize)),
                        Style::default().fg(theme.muted),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let title = match &self.error {
            Some(err) => format!(" {} [{}] ", self.dir.display(), err),
            None => format!(" {} ", self.dir.display()),
        };

        let list = List::new(items)
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(theme.border_type)
                    .border_style(Style::default().fg(theme.highlight))
                    .title(title)
                    .title_bottom(Line::from(" Enter:open  Backspace:up  Esc:cancel ").centered()),
            );

        f.render_widget(list, area);
        render_scrollbar(f, area, &self.scroll, ScrollbarStyle::Minimal);
    }
}

impl Interactive for FilePicker {
    /// Esc is left to App, which closes the picker
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.entries.len().saturating_sub(1),
            KeyCode::PageUp => {
                self.selected = self
                    .selected
                    .saturating_sub(self.scroll.viewport().max(1));
            }
            KeyCode::PageDown => {
                self.selected = (self.selected + self.scroll.viewport().max(1))
                    .min(self.entries.len().saturating_sub(1));
            }
            KeyCode::Enter => self.activate(),
            KeyCode::Backspace | KeyCode::Left => self.go_parent(),
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:select  Enter:open/pick  Backspace:up  Esc:cancel")
    }
}

fn parent_row(dir: &Path) -> Vec<PickerEntry> {
    if dir.parent().is_some() {
        vec![PickerEntry::Parent]
    } else {
        Vec::new()
    }
}

/// Directories first, then image files, each in case-insensitive order
fn read_entries(dir: &Path) -> Result<Vec<PickerEntry>> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    let listing =
        std::fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))?;

    for entry in listing.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        // Follows symlinks so linked folders stay browsable
        let Ok(meta) = std::fs::metadata(entry.path()) else {
            continue;
        };
        if meta.is_dir() {
            dirs.push(name);
        } else if meta.is_file() && is_image_name(&name) {
            files.push(PickerEntry::File {
                name,
                size: meta.len(),
            });
        }
    }

    dirs.sort_by_key(|name| name.to_lowercase());
    files.sort_by_key(|entry| entry.label().to_lowercase());

    let mut entries = parent_row(dir);
    entries.extend(dirs.into_iter().map(PickerEntry::Dir));
    entries.extend(files);
    Ok(entries)
}
