// Key repeat handling
//
// Terminals deliver a stream of Press events while a key is held. Some keys
// should fire once per press (navigation between views, upload, quit), others
// should repeat after a delay (scrolling the result and the file picker).

use crossterm::event::KeyCode;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Minimum gap between two firings of a StateChange key.
/// Terminals without Release events would otherwise never re-arm the key.
const STATE_CHANGE_DEBOUNCE: Duration = Duration::from_millis(150);

/// How a key behaves when pressed and held
#[derive(Debug, Clone, Copy)]
pub enum KeyBehavior {
    /// Fire once per press
    StateChange,

    /// Fire on press, then repeat after an initial delay
    Repeatable {
        initial_delay: Duration,
        repeat_interval: Duration,
    },
}

impl KeyBehavior {
    /// Arrow keys and j/k
    pub fn navigation() -> Self {
        Self::Repeatable {
            initial_delay: Duration::from_millis(500),
            repeat_interval: Duration::from_millis(50),
        }
    }

    /// PageUp/PageDown
    pub fn fast_navigation() -> Self {
        Self::Repeatable {
            initial_delay: Duration::from_millis(300),
            repeat_interval: Duration::from_millis(30),
        }
    }
}

#[derive(Debug, Default)]
struct KeyState {
    is_pressed: bool,
    press_started: Option<Instant>,
    last_triggered: Option<Instant>,
}

impl KeyState {
    fn release(&mut self) {
        *self = Self::default();
    }
}

/// Tracks held keys and decides whether each Press event should fire
pub struct InputHandler {
    key_states: HashMap<KeyCode, KeyState>,
    key_behaviors: HashMap<KeyCode, KeyBehavior>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            key_states: HashMap::new(),
            key_behaviors: HashMap::new(),
        }
    }

    pub fn configure_key(&mut self, key: KeyCode, behavior: KeyBehavior) {
        self.key_behaviors.insert(key, behavior);
    }

    pub fn configure_keys(&mut self, keys: &[KeyCode], behavior: KeyBehavior) {
        for key in keys {
            self.configure_key(*key, behavior);
        }
    }

    /// Returns true if the action bound to `key` should run.
    /// Unconfigured keys behave as StateChange.
    pub fn handle_key_press(&mut self, key: KeyCode) -> bool {
        let now = Instant::now();
        let behavior = self
            .key_behaviors
            .get(&key)
            .copied()
            .unwrap_or(KeyBehavior::StateChange);

        let state = self.key_states.entry(key).or_default();

        if !state.is_pressed {
            state.is_pressed = true;
            state.press_started = Some(now);
            state.last_triggered = Some(now);
            return true;
        }

        match behavior {
            KeyBehavior::StateChange => match state.last_triggered {
                Some(last) if now.duration_since(last) >= STATE_CHANGE_DEBOUNCE => {
                    state.last_triggered = Some(now);
                    true
                }
                _ => false,
            },
            KeyBehavior::Repeatable {
                initial_delay,
                repeat_interval,
            } => match (state.press_started, state.last_triggered) {
                (Some(started), Some(last))
                    if now.duration_since(started) >= initial_delay
                        && now.duration_since(last) >= repeat_interval =>
                {
                    state.last_triggered = Some(now);
                    true
                }
                _ => false,
            },
        }
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        if let Some(state) = self.key_states.get_mut(&key) {
            state.release();
        }
    }

    /// Bindings used by the app: scrolling repeats, everything else fires once
    pub fn with_default_config() -> Self {
        let mut handler = Self::new();

        handler.configure_keys(
            &[
                KeyCode::Up,
                KeyCode::Down,
                KeyCode::Left,
                KeyCode::Right,
                KeyCode::Char('j'),
                KeyCode::Char('k'),
            ],
            KeyBehavior::navigation(),
        );

        handler.configure_keys(
            &[KeyCode::PageUp, KeyCode::PageDown],
            KeyBehavior::fast_navigation(),
        );

        handler.configure_keys(
            &[
                KeyCode::Enter,
                KeyCode::Esc,
                KeyCode::Backspace,
                KeyCode::Home,
                KeyCode::End,
                KeyCode::Char('q'),
                KeyCode::Char('u'),
                KeyCode::Char('?'),
                KeyCode::Char('y'),
                KeyCode::Char('Y'),
                KeyCode::Char('t'),
                KeyCode::Char('L'),
                KeyCode::F(1),
                KeyCode::F(2),
                KeyCode::F(3),
            ],
            KeyBehavior::StateChange,
        );

        handler
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::with_default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_state_change_no_repeat() {
        let mut handler = InputHandler::new();
        handler.configure_key(KeyCode::Char('u'), KeyBehavior::StateChange);

        assert!(handler.handle_key_press(KeyCode::Char('u')));
        assert!(!handler.handle_key_press(KeyCode::Char('u')));
        assert!(!handler.handle_key_press(KeyCode::Char('u')));

        handler.handle_key_release(KeyCode::Char('u'));
        assert!(handler.handle_key_press(KeyCode::Char('u')));
    }

    #[test]
    fn test_state_change_rearms_without_release() {
        let mut handler = InputHandler::new();
        assert!(handler.handle_key_press(KeyCode::Enter));
        assert!(!handler.handle_key_press(KeyCode::Enter));

        thread::sleep(STATE_CHANGE_DEBOUNCE + Duration::from_millis(20));
        assert!(handler.handle_key_press(KeyCode::Enter));
    }

    #[test]
    fn test_repeatable_with_delay() {
        let mut handler = InputHandler::new();
        handler.configure_key(
            KeyCode::Down,
            KeyBehavior::Repeatable {
                initial_delay: Duration::from_millis(100),
                repeat_interval: Duration::from_millis(50),
            },
        );

        assert!(handler.handle_key_press(KeyCode::Down));
        assert!(!handler.handle_key_press(KeyCode::Down));

        thread::sleep(Duration::from_millis(110));
        assert!(handler.handle_key_press(KeyCode::Down));

        thread::sleep(Duration::from_millis(60));
        assert!(handler.handle_key_press(KeyCode::Down));
    }
}
