// Modal system for TUI overlays
//
// Modals handle their own input and return actions. App holds
// Option<Modal> and acts on the returned ModalAction.

use crossterm::event::KeyCode;

/// Actions returned by modal input handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    /// Input consumed, nothing else to do
    None,
    /// Close the modal
    Close,
    /// Copy the modal text to the clipboard
    Copy,
}

/// Available modal types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Keyboard shortcuts
    Help,
    /// Blocking message with a single acknowledge action.
    /// Analysis failures land here.
    Alert(String),
}

impl Modal {
    pub fn help() -> Self {
        Modal::Help
    }

    pub fn alert(message: impl Into<String>) -> Self {
        Modal::Alert(message.into())
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            // An alert must be acknowledged explicitly; q is swallowed
            Modal::Alert(_) => match key {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => ModalAction::Close,
                KeyCode::Char('y') => ModalAction::Copy,
                _ => ModalAction::None,
            },
        }
    }

    /// Text offered to the clipboard
    pub fn message(&self) -> Option<&str> {
        match self {
            Modal::Alert(message) => Some(message),
            Modal::Help => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_closes_on_acknowledge_only() {
        let mut modal = Modal::alert("Analysis failed: Backend failed to respond");
        assert_eq!(modal.handle_input(KeyCode::Char('q')), ModalAction::None);
        assert_eq!(modal.handle_input(KeyCode::Char('u')), ModalAction::None);
        assert_eq!(modal.handle_input(KeyCode::Enter), ModalAction::Close);
        assert_eq!(modal.handle_input(KeyCode::Char('y')), ModalAction::Copy);
        assert_eq!(
            modal.message(),
            Some("Analysis failed: Backend failed to respond")
        );
    }

    #[test]
    fn help_closes_on_toggle_key() {
        let mut modal = Modal::help();
        assert_eq!(modal.handle_input(KeyCode::Char('?')), ModalAction::Close);
        assert_eq!(modal.handle_input(KeyCode::Enter), ModalAction::None);
        assert_eq!(modal.message(), None);
    }
}
