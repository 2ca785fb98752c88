//! Clipboard helper for copying a rendered analysis
//!
//! Uses `arboard` for cross-platform support. The clipboard handle is
//! created per copy so nothing is held between key presses.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copy text to the system clipboard.
/// Fails on headless Linux (no display server) and similar setups.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}

/// Toast text for the outcome of a copy
pub fn copy_toast(what: &str, result: &Result<()>) -> String {
    match result {
        Ok(()) => format!("✓ Copied {} to clipboard", what),
        Err(e) => {
            tracing::debug!(error = %e, "Clipboard copy failed");
            "✗ Failed to copy".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_reflects_outcome() {
        assert_eq!(copy_toast("analysis", &Ok(())), "✓ Copied analysis to clipboard");
        let failed: Result<()> = Err(anyhow::anyhow!("no display"));
        assert_eq!(copy_toast("analysis", &failed), "✗ Failed to copy");
    }
}
