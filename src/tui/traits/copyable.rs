//! Copyable trait for components that provide clipboard content

/// Content a component can put on the clipboard.
///
/// - `y` copies `copy_text()`: readable text for pasting into notes or chat
/// - `Y` copies `copy_data()`: JSON for scripts
pub trait Copyable {
    /// None when there is nothing to copy
    fn copy_text(&self) -> Option<String>;

    fn copy_data(&self) -> Option<String> {
        None
    }

    /// Used in the toast: "✓ Copied <description> to clipboard"
    fn copy_description(&self) -> &'static str;
}
