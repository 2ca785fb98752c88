//! Interactive trait for components that handle keyboard input

use crossterm::event::KeyEvent;

/// Whether a component consumed a key event or it should bubble up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Yes,
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Components that receive keys routed by App.
///
/// ```text
/// KeyEvent
///    │
///    ▼
/// Modal (if open, consumes everything)
///    │
///    ▼
/// Active component (upload dialog, picker, result panel)
///    │ Handled::No
///    ▼
/// App global keys (q, F1-F3, ?, u, t, L)
/// ```
pub trait Interactive {
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Key hints for the status bar while this component is active
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}
