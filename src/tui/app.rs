// TUI application state
//
// App is the shell: it owns the current view, the upload dialog and file
// picker overlays, the result being shown, modals, toasts and the theme.
// Network work never happens here. A submission is parked in `pending`
// for the event loop to spawn, and the outcome comes back through
// `finish_analysis`.

use super::clipboard;
use super::components::{FilePicker, LogsPanel, ResultPanel, Toast, UploadDialog};
use super::input::InputHandler;
use super::modal::Modal;
use super::traits::{Copyable, Handled, Interactive};
use crate::analysis::{AnalysisError, AnalysisResponse, DocumentPreview, SelectedFile};
use crate::config::Config;
use crate::logging::LogBuffer;
use crate::theme::{Theme, ThemeConfig};
use crate::upload::{Completion, Submission};
use crossterm::event::{KeyCode, KeyEvent};
use std::path::{Path, PathBuf};

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Hero and feature summary, or the result when one is held
    #[default]
    Home,
    /// How it works
    About,
    Contact,
}

impl View {
    pub fn all() -> &'static [View] {
        &[View::Home, View::About, View::Contact]
    }

    pub fn name(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::About => "How it works",
            View::Contact => "Contact",
        }
    }
}

const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];

pub struct App {
    pub view: View,
    pub should_quit: bool,

    pub upload: UploadDialog,
    pub picker: Option<FilePicker>,
    pub modal: Option<Modal>,
    /// Result held by the shell; None on start and after reset
    pub result: Option<ResultPanel>,
    pub toast: Option<Toast>,

    pub theme: Theme,
    pub show_logs: bool,
    pub logs_panel: LogsPanel,
    pub log_buffer: LogBuffer,

    input_handler: InputHandler,
    config: Config,
    /// Submission waiting to be spawned by the event loop
    pending: Option<Submission>,
    animation_frame: usize,
}

impl App {
    pub fn with_config(log_buffer: LogBuffer, config: Config) -> Self {
        Self {
            view: View::default(),
            should_quit: false,
            upload: UploadDialog::new(config.language),
            picker: None,
            modal: None,
            result: None,
            toast: None,
            theme: Theme::from_config(&config),
            show_logs: false,
            logs_panel: LogsPanel::new(),
            log_buffer,
            input_handler: InputHandler::default(),
            config,
            pending: None,
            animation_frame: 0,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Input plumbing
    // ─────────────────────────────────────────────────────────────────────

    /// Returns true if the action bound to `key` should run
    pub fn handle_key_press(&mut self, key: KeyCode) -> bool {
        self.input_handler.handle_key_press(key)
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        self.input_handler.handle_key_release(key);
    }

    /// Route a key to whichever overlay or panel is on top.
    /// Overlays swallow everything; Esc bubbles out of them so App can close them.
    pub fn dispatch_to_active(&mut self, key: KeyEvent) -> Handled {
        if let Some(picker) = self.picker.as_mut() {
            if picker.handle_key(key).was_handled() {
                if let Some(path) = picker.take_chosen() {
                    self.pick_file(&path);
                }
                return Handled::Yes;
            }
            if key.code == KeyCode::Esc {
                self.close_picker();
            }
            return Handled::Yes;
        }

        if self.upload.is_open() {
            if self.upload.handle_key(key).was_handled() {
                if self.upload.take_pick_request() {
                    self.open_picker();
                }
            } else if key.code == KeyCode::Esc {
                self.dismiss_upload();
            }
            return Handled::Yes;
        }

        if self.view == View::Home {
            if let Some(result) = self.result.as_mut() {
                if result.handle_key(key).was_handled() {
                    return Handled::Yes;
                }
            }
        }

        if self.show_logs {
            return self.logs_panel.handle_key(key);
        }
        Handled::No
    }

    /// True while an overlay owns the keyboard
    pub fn overlay_open(&self) -> bool {
        self.picker.is_some() || self.upload.is_open()
    }

    /// Hints for the status bar from the component that has input
    pub fn focus_hint(&self) -> &'static str {
        let hint = if self.modal.is_some() {
            Some("Enter:OK  y:copy")
        } else if let Some(picker) = &self.picker {
            picker.focus_hint()
        } else if self.upload.is_open() {
            self.upload.focus_hint()
        } else if let (View::Home, Some(result)) = (self.view, &self.result) {
            result.focus_hint()
        } else {
            None
        };
        hint.unwrap_or("u:upload  F1-F3:views  ?:help  q:quit")
    }

    // ─────────────────────────────────────────────────────────────────────
    // Upload flow
    // ─────────────────────────────────────────────────────────────────────

    pub fn open_upload(&mut self) {
        self.view = View::Home;
        self.upload.open();
    }

    /// Close dialog and picker; an in-flight request becomes stale
    pub fn dismiss_upload(&mut self) {
        self.picker = None;
        self.upload.dismiss();
    }

    fn start_dir(&self) -> PathBuf {
        self.config
            .start_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn open_picker(&mut self) {
        self.picker = Some(FilePicker::open(self.start_dir()));
    }

    /// Close the picker, remembering its directory for next time.
    /// The chosen category stays selected.
    fn close_picker(&mut self) {
        if let Some(picker) = self.picker.take() {
            self.config.start_dir = Some(picker.dir().to_path_buf());
        }
    }

    /// Load the picked file and submit it. Non-images keep the picker open.
    pub fn pick_file(&mut self, path: &Path) {
        let file = match SelectedFile::load(path) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %format!("{:#}", e), "Cannot read picked file");
                self.show_toast("✗ Could not read file");
                return;
            }
        };

        if !file.is_image() {
            tracing::info!(file = %file.name, mime = %file.mime, "Rejected non-image file");
            self.show_toast(format!("✗ Not an image: {}", file.name));
            return;
        }

        self.close_picker();
        match self.upload.interaction_mut().submit(file) {
            Some(submission) => self.pending = Some(submission),
            None => self.show_toast("✗ Nothing to upload"),
        }
    }

    /// Submission for the event loop to send, handed over once
    pub fn take_submission(&mut self) -> Option<Submission> {
        self.pending.take()
    }

    /// Apply a finished request to the shell.
    ///
    /// `preview` is decoded next to the request; it is dropped with the
    /// response when the completion turns out stale or failed.
    pub fn finish_analysis(
        &mut self,
        generation: u64,
        result: Result<AnalysisResponse, AnalysisError>,
        preview: Option<DocumentPreview>,
    ) {
        match self.upload.interaction_mut().complete(generation, result) {
            Completion::Delivered { response } => {
                self.result = Some(ResultPanel::new(response, preview));
                self.view = View::Home;
            }
            Completion::Failed { alert, .. } => {
                self.modal = Some(Modal::alert(alert));
            }
            Completion::Stale => {}
        }
    }

    /// Drop the result (and its preview), back to the home hero
    pub fn reset_result(&mut self) {
        if self.result.take().is_some() {
            tracing::debug!("Result cleared");
        }
    }

    /// "Try Again" from the invalid view
    pub fn retry(&mut self) {
        self.reset_result();
        self.open_upload();
    }

    // ─────────────────────────────────────────────────────────────────────
    // Shell actions
    // ─────────────────────────────────────────────────────────────────────

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
    }

    pub fn cycle_theme(&mut self) {
        let name = Theme::next_name(&self.theme.name);
        self.theme = Theme::by_name_with_config(
            &name,
            &ThemeConfig {
                use_theme_background: self.config.use_theme_background,
            },
        );
        self.config.theme = self.theme.name.clone();
        tracing::debug!(theme = %self.theme.name, "Theme changed");
        self.show_toast(format!("Theme: {}", self.theme.name));
    }

    /// `y`: readable text, `Y`: JSON. Copies the result, or the logs when no result is shown.
    pub fn copy_current(&mut self, data: bool) {
        let source: Option<&dyn Copyable> = match (&self.result, self.view) {
            (Some(result), View::Home) => Some(result),
            _ if self.show_logs => Some(&self.logs_panel),
            _ => None,
        };
        let Some(source) = source else {
            return;
        };

        let content = if data {
            source.copy_data().or_else(|| source.copy_text())
        } else {
            source.copy_text()
        };
        let what = source.copy_description();

        if let Some(text) = content {
            let outcome = clipboard::copy_to_clipboard(&text);
            self.show_toast(clipboard::copy_toast(what, &outcome));
        }
    }

    pub fn copy_alert(&mut self) {
        let Some(message) = self.modal.as_ref().and_then(|m| m.message()) else {
            return;
        };
        let outcome = clipboard::copy_to_clipboard(message);
        self.show_toast(clipboard::copy_toast("message", &outcome));
    }

    pub fn api_base_url(&self) -> &str {
        &self.config.api_base_url
    }

    // ─────────────────────────────────────────────────────────────────────
    // Toasts and animation
    // ─────────────────────────────────────────────────────────────────────

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    pub fn spinner_char(&self) -> char {
        SPINNER[self.animation_frame % SPINNER.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Category, InvalidReason};
    use crossterm::event::KeyModifiers;
    use image::{ImageFormat, Rgb, RgbImage};
    use reqwest::StatusCode;
    use serde_json::json;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn write_png(dir: &Path, name: &str) -> PathBuf {
        let img = RgbImage::from_pixel(8, 8, Rgb([10, 200, 10]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).expect("encode");
        let path = dir.join(name);
        std::fs::write(&path, out.into_inner()).expect("write");
        path
    }

    fn app_in(dir: &Path) -> App {
        let config = Config {
            start_dir: Some(dir.to_path_buf()),
            ..Config::default()
        };
        App::with_config(LogBuffer::new(), config)
    }

    /// Open the dialog, choose a category and pick `path`
    fn submit(app: &mut App, category: Category, path: &Path) -> Submission {
        app.open_upload();
        let digit = match category {
            Category::MedicalReport => '1',
            Category::MedicalBill => '2',
        };
        app.dispatch_to_active(key(KeyCode::Char(digit)));
        assert!(app.picker.is_some(), "category opens the picker");
        app.pick_file(path);
        app.take_submission().expect("submission")
    }

    fn report() -> AnalysisResponse {
        AnalysisResponse::classify(Some(&json!({
            "summary": "ok",
            "findings": [{"parameter": "Hemoglobin", "value": "10", "status": "Low", "explanation": ""}]
        })))
    }

    #[test]
    fn delivered_result_replaces_dialog() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_png(dir.path(), "cbc.png");
        let mut app = app_in(dir.path());

        let submission = submit(&mut app, Category::MedicalReport, &path);
        assert_eq!(submission.request.mode().as_str(), "report");
        assert!(app.picker.is_none());
        assert!(app.upload.interaction().is_busy());

        let preview = DocumentPreview::from_request(&submission.request);
        app.finish_analysis(submission.generation, Ok(report()), Some(preview));
        assert!(!app.upload.is_open());
        let result = app.result.as_ref().expect("result");
        assert!(!result.is_invalid());
        assert_eq!(
            result.preview().and_then(|p| p.dimensions),
            Some((8, 8))
        );
    }

    #[test]
    fn failure_raises_alert_and_keeps_dialog_open() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_png(dir.path(), "bill.png");
        let mut app = app_in(dir.path());

        let submission = submit(&mut app, Category::MedicalBill, &path);
        app.finish_analysis(
            submission.generation,
            Err(AnalysisError::Status(StatusCode::INTERNAL_SERVER_ERROR)),
            None,
        );

        assert_eq!(
            app.modal,
            Some(Modal::alert("Analysis failed: Backend failed to respond"))
        );
        assert!(app.upload.is_open());
        assert!(!app.upload.interaction().is_busy());
        assert_eq!(app.upload.interaction().category(), None);
        assert!(app.result.is_none());
    }

    #[test]
    fn dismissed_request_is_discarded() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_png(dir.path(), "cbc.png");
        let mut app = app_in(dir.path());

        let submission = submit(&mut app, Category::MedicalReport, &path);
        app.dispatch_to_active(key(KeyCode::Esc));
        assert!(!app.upload.is_open());

        app.finish_analysis(submission.generation, Ok(report()), None);
        assert!(app.result.is_none());
        assert!(app.modal.is_none());
    }

    #[test]
    fn non_image_pick_is_rejected_with_toast() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("fake.png");
        std::fs::write(&path, b"definitely not a png").expect("write");
        let mut app = app_in(dir.path());

        app.open_upload();
        app.dispatch_to_active(key(KeyCode::Char('1')));
        app.pick_file(&path);

        assert!(app.take_submission().is_none());
        assert!(app.picker.is_some());
        assert!(app
            .toast
            .as_ref()
            .is_some_and(|t| t.message.contains("Not an image")));
    }

    #[test]
    fn esc_in_picker_keeps_category() {
        let dir = TempDir::new().expect("tempdir");
        let mut app = app_in(dir.path());

        app.open_upload();
        app.dispatch_to_active(key(KeyCode::Char('2')));
        app.dispatch_to_active(key(KeyCode::Esc));

        assert!(app.picker.is_none());
        assert!(app.upload.is_open());
        assert_eq!(
            app.upload.interaction().category(),
            Some(Category::MedicalBill)
        );
    }

    #[test]
    fn retry_from_invalid_reopens_upload() {
        let dir = TempDir::new().expect("tempdir");
        let mut app = app_in(dir.path());
        app.result = Some(ResultPanel::new(
            AnalysisResponse::Invalid(InvalidReason::Missing),
            None,
        ));

        app.retry();
        assert!(app.result.is_none());
        assert!(app.upload.is_open());
    }

    #[test]
    fn focus_hint_follows_top_layer() {
        let dir = TempDir::new().expect("tempdir");
        let mut app = app_in(dir.path());
        assert!(app.focus_hint().contains("u:upload"));

        app.open_upload();
        assert!(app.focus_hint().contains("1:report"));

        app.modal = Some(Modal::alert("x"));
        assert!(app.focus_hint().contains("Enter:OK"));
    }
}
