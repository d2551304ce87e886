//! Terminal event types delivered to components

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

/// The event payload handed to `Component::handle_event`
#[derive(Debug, Clone)]
pub enum EventKind {
    /// Keyboard event
    Key(KeyEvent),
    /// Mouse click/drag/move event
    Mouse(MouseEvent),
    /// Scroll event with position and delta
    Scroll { column: u16, row: u16, delta: isize },
    /// Terminal resize
    Resize(u16, u16),
}

impl EventKind {
    /// Check if this is a global event (should be seen regardless of focus)
    pub fn is_global(&self) -> bool {
        match self {
            EventKind::Key(key) => {
                key.modifiers.contains(KeyModifiers::CONTROL)
                    && matches!(key.code, KeyCode::Char('c'))
            }
            EventKind::Resize(_, _) => true,
            _ => false,
        }
    }
}
