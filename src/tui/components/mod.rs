// Components module - reusable UI building blocks
//
// Shell components are rendered in every view:
// - Title bar: app name, view tabs, busy spinner
// - Status bar: backend, language, theme, key hints
// - Logs panel: system log entries (toggled with L)
//
// Overlay and content components:
// - Upload dialog, file picker, result panel, document preview, toast

pub mod file_picker;
pub mod formatters;
pub mod logs_panel;
pub mod preview;
pub mod result_panel;
pub mod scrollbar;
pub mod status_bar;
pub mod title_bar;
pub mod toast;
pub mod upload_dialog;

pub use file_picker::FilePicker;
pub use logs_panel::LogsPanel;
pub use result_panel::ResultPanel;
pub use toast::Toast;
pub use upload_dialog::UploadDialog;

use crate::tui::app::App;
use ratatui::{layout::Rect, Frame};

/// Render the title bar (convenience wrapper)
pub fn render_title(f: &mut Frame, area: Rect, app: &App) {
    title_bar::render(f, area, app);
}

/// Render the status bar (convenience wrapper)
pub fn render_status(f: &mut Frame, area: Rect, app: &App) {
    status_bar::render(f, area, app);
}

/// Sync the logs panel with the buffer and render it
pub fn render_logs_panel(f: &mut Frame, area: Rect, app: &mut App) {
    let entries = app.log_buffer.snapshot();
    app.logs_panel
        .sync_entries(&entries, area.height.saturating_sub(2) as usize);
    app.logs_panel.render(f, area, &app.theme);
}
