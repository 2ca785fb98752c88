//! Scrollable trait for components with scrollable content

use crate::tui::scroll::ScrollState;

/// Uniform scroll operations over a component-owned `ScrollState`.
///
/// Implementors provide `scroll_state()` and `scroll_state_mut()`; the
/// navigation methods delegate by default.
pub trait Scrollable {
    fn scroll_state(&self) -> &ScrollState;

    fn scroll_state_mut(&mut self) -> &mut ScrollState;

    // ─────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────

    fn scroll_up(&mut self) {
        self.scroll_state_mut().scroll_up();
    }

    fn scroll_down(&mut self) {
        self.scroll_state_mut().scroll_down();
    }

    fn scroll_to_top(&mut self) {
        self.scroll_state_mut().scroll_to_top();
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_state_mut().scroll_to_bottom();
    }

    fn page_up(&mut self) {
        self.scroll_state_mut().page_up();
    }

    fn page_down(&mut self) {
        self.scroll_state_mut().page_down();
    }

    // ─────────────────────────────────────────────────────────────
    // State queries
    // ─────────────────────────────────────────────────────────────

    fn visible_range(&self) -> (usize, usize) {
        self.scroll_state().visible_range()
    }

    fn scroll_offset(&self) -> usize {
        self.scroll_state().offset()
    }

    /// Call every frame with current sizes
    fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.scroll_state_mut().update_dimensions(total, viewport);
    }

    /// Shared handling for Up/Down/j/k, Home/End and PageUp/PageDown
    fn handle_scroll_keys(&mut self, code: crossterm::event::KeyCode) -> super::Handled {
        use crossterm::event::KeyCode;

        match code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(),
            KeyCode::Home => self.scroll_to_top(),
            KeyCode::End => self.scroll_to_bottom(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown => self.page_down(),
            _ => return super::Handled::No,
        }
        super::Handled::Yes
    }
}
