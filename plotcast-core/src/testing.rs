//! Test utilities for plotcast applications
//!
//! - [`key`]: Create `KeyEvent` from string (e.g., `key("ctrl+c")`)
//! - [`TestHarness`]: State plus an action channel for capturing emitted actions
//! - [`RenderHarness`]: Render into an in-memory buffer and read it back as text
//! - [`ActionAssertions`]: Fluent checks on `Vec<A>` returned by components
//! - Assertion macros for verifying emitted actions
//!
//! # Example
//!
//! ```ignore
//! use plotcast::testing::{key, RenderHarness, ActionAssertions};
//!
//! let actions = component.handle_event(&EventKind::Key(key("enter")), props);
//! actions.assert_first(Action::ForecastFetch);
//!
//! let mut render = RenderHarness::new(60, 20);
//! let output = render.render_to_string_plain(|frame| {
//!     component.render(frame, frame.area(), props);
//! });
//! assert!(output.contains("Forecast"));
//! ```

use std::fmt::Debug;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;

use crate::event::EventKind;
use crate::Action;

/// Parse a key description such as `"q"`, `"enter"`, `"ctrl+c"`, `"shift+tab"`.
///
/// Returns `None` for unknown key names.
pub fn parse_key_string(s: &str) -> Option<KeyEvent> {
    let lowered = s.trim().to_lowercase();
    let mut parts: Vec<&str> = lowered.split('+').collect();
    let name = parts.pop()?;
    let mut modifiers = KeyModifiers::empty();
    for part in parts {
        match part {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            _ => return None,
        }
    }

    let code = match name {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" if modifiers.contains(KeyModifiers::SHIFT) => {
            modifiers.remove(KeyModifiers::SHIFT);
            KeyCode::BackTab
        }
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "space" => KeyCode::Char(' '),
        f if f.len() > 1 && f.starts_with('f') => KeyCode::F(f[1..].parse().ok()?),
        c if c.chars().count() == 1 => KeyCode::Char(c.chars().next()?),
        _ => return None,
    };

    Some(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

/// Create a `KeyEvent` from a key string.
///
/// # Examples
///
/// ```
/// use plotcast_core::testing::key;
/// use crossterm::event::{KeyCode, KeyModifiers};
///
/// let k = key("q");
/// assert_eq!(k.code, KeyCode::Char('q'));
///
/// let k = key("ctrl+c");
/// assert_eq!(k.code, KeyCode::Char('c'));
/// assert!(k.modifiers.contains(KeyModifiers::CONTROL));
/// ```
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key_string(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Create a `KeyEvent` for a character with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Create a `KeyEvent` for a character with Ctrl modifier.
pub fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Key events for each character of `text`, e.g. to simulate typing.
pub fn type_text(text: &str) -> Vec<EventKind> {
    text.chars().map(|c| EventKind::Key(char_key(c))).collect()
}

/// A left-button press at the given cell.
pub fn click(column: u16, row: u16) -> EventKind {
    EventKind::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

/// Generic test harness for plotcast applications.
///
/// Provides:
/// - State management with a simple `state` field
/// - Action channel for capturing emitted actions
/// - Helper methods for emitting and draining actions
pub struct TestHarness<S, A: Action> {
    /// The application state under test
    pub state: S,
    tx: mpsc::UnboundedSender<A>,
    rx: mpsc::UnboundedReceiver<A>,
}

impl<S, A: Action> TestHarness<S, A> {
    /// Create a new test harness with the given initial state.
    pub fn new(state: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { state, tx, rx }
    }

    /// Get a clone of the action sender for passing to handlers.
    pub fn sender(&self) -> mpsc::UnboundedSender<A> {
        self.tx.clone()
    }

    /// Emit an action (simulates what a handler would do).
    pub fn emit(&self, action: A) {
        let _ = self.tx.send(action);
    }

    /// A dispatch closure that records into this harness.
    pub fn dispatcher(&self) -> impl FnMut(A) + Send + 'static {
        let tx = self.tx.clone();
        move |action| {
            let _ = tx.send(action);
        }
    }

    /// Drain all emitted actions from the channel.
    pub fn drain_emitted(&mut self) -> Vec<A> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }
}

impl<S: Default, A: Action> Default for TestHarness<S, A> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

/// Fluent assertions on a list of emitted actions.
pub trait ActionAssertions<A> {
    /// Assert no actions were emitted.
    fn assert_empty(&self);
    /// Assert exactly `n` actions were emitted.
    fn assert_count(&self, n: usize);
    /// Assert the first action equals `expected`.
    fn assert_first(&self, expected: A);
    /// Assert the whole sequence equals `expected`, in order.
    fn assert_sequence(&self, expected: &[A]);
}

impl<A: PartialEq + Debug> ActionAssertions<A> for Vec<A> {
    fn assert_empty(&self) {
        assert!(self.is_empty(), "Expected no actions, got: {:?}", self);
    }

    fn assert_count(&self, n: usize) {
        assert_eq!(
            self.len(),
            n,
            "Expected {} actions, got {}: {:?}",
            n,
            self.len(),
            self
        );
    }

    fn assert_first(&self, expected: A) {
        match self.first() {
            Some(first) => assert_eq!(first, &expected, "First action mismatch in {:?}", self),
            None => panic!("Expected first action {:?}, but none were emitted", expected),
        }
    }

    fn assert_sequence(&self, expected: &[A]) {
        assert_eq!(self.as_slice(), expected, "Action sequence mismatch");
    }
}

/// Renders into a `TestBackend` buffer of fixed size.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// Create a harness with the given terminal dimensions.
    ///
    /// # Panics
    ///
    /// Panics if the test terminal cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .expect("test backend terminal should always build");
        Self { terminal }
    }

    /// Render a frame and return the resulting buffer.
    pub fn render<F>(&mut self, draw: F) -> &Buffer
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal
            .draw(draw)
            .expect("drawing to a test backend should not fail");
        self.terminal.backend().buffer()
    }

    /// Render a frame and return its symbols as text, one line per row.
    pub fn render_to_string_plain<F>(&mut self, draw: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        buffer_to_string_plain(self.render(draw))
    }
}

/// Convert a buffer to plain text (no styling), rows separated by `\n`.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::with_capacity((area.width as usize + 1) * area.height as usize);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

/// Assert that a specific action was emitted.
///
/// ```ignore
/// let actions = harness.drain_emitted();
/// assert_emitted!(actions, Action::SetLocation(_));
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that a specific action was NOT emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Count how many actions match a pattern.
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_key_simple() {
        let k = key("q");
        assert_eq!(k.code, KeyCode::Char('q'));
        assert_eq!(k.modifiers, KeyModifiers::empty());
    }

    #[test]
    fn test_key_with_ctrl() {
        let k = key("ctrl+c");
        assert_eq!(k.code, KeyCode::Char('c'));
        assert!(k.modifiers.contains(KeyModifiers::CONTROL));
    }

    #[test]
    fn test_key_special() {
        assert_eq!(key("esc").code, KeyCode::Esc);
        assert_eq!(key("enter").code, KeyCode::Enter);
        assert_eq!(key("shift+tab").code, KeyCode::BackTab);
        assert_eq!(key("f5").code, KeyCode::F(5));
        assert!(parse_key_string("hyper+x").is_none());
        assert!(parse_key_string("nonsense").is_none());
    }

    #[test]
    fn test_type_text_and_click() {
        let events = type_text("ab");
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[1], EventKind::Key(k) if k.code == KeyCode::Char('b')));

        match click(3, 4) {
            EventKind::Mouse(m) => assert_eq!((m.column, m.row), (3, 4)),
            other => panic!("Expected mouse event, got {:?}", other),
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Foo,
        Bar(i32),
    }

    impl crate::Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Foo => "Foo",
                TestAction::Bar(_) => "Bar",
            }
        }
    }

    #[test]
    fn test_harness_emit_and_drain() {
        let mut harness = TestHarness::<(), TestAction>::new(());

        harness.emit(TestAction::Foo);
        let mut dispatch = harness.dispatcher();
        dispatch(TestAction::Bar(42));

        let actions = harness.drain_emitted();
        actions.assert_sequence(&[TestAction::Foo, TestAction::Bar(42)]);

        let actions = harness.drain_emitted();
        actions.assert_empty();
    }

    #[test]
    fn test_assert_macros() {
        let actions = vec![TestAction::Foo, TestAction::Bar(42)];

        assert_emitted!(actions, TestAction::Foo);
        assert_emitted!(actions, TestAction::Bar(n) if *n == 42);
        assert_not_emitted!(actions, TestAction::Bar(99));
        assert_eq!(count_emitted!(actions, TestAction::Bar(_)), 1);

        actions.assert_count(2);
        actions.assert_first(TestAction::Foo);
    }

    #[test]
    fn test_render_harness() {
        let mut render = RenderHarness::new(10, 2);
        let output = render.render_to_string_plain(|frame| {
            frame.render_widget(Paragraph::new("hello"), frame.area());
        });

        assert_eq!(output.lines().count(), 2);
        assert!(output.starts_with("hello     "));
    }
}
