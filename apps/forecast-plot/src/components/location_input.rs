//! Single-line location input

use crossterm::event::{KeyCode, KeyModifiers};
use plotcast::{Component, EventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::action::Action;

pub const PLACEHOLDER: &str = "City,Country (e.g. London,UK)";

pub struct LocationInputProps<'a> {
    /// Current query, straight from state
    pub value: &'a str,
    pub is_focused: bool,
}

/// Text input for the location query
///
/// Every edit emits `SetLocation` with the whole new value; Enter emits
/// `ForecastFetch`. Only the cursor lives here.
#[derive(Default)]
pub struct LocationInput {
    /// Cursor position (byte index into the value)
    cursor: usize,
}

impl LocationInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn clamp_cursor(&mut self, value: &str) {
        self.cursor = self.cursor.min(value.len());
        while !value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    fn prev_boundary(&self, value: &str) -> Option<usize> {
        value[..self.cursor].char_indices().last().map(|(i, _)| i)
    }

    fn next_boundary(&self, value: &str) -> Option<usize> {
        value[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }

    fn insert(&mut self, value: &str, c: char) -> String {
        let mut edited = String::with_capacity(value.len() + c.len_utf8());
        edited.push_str(&value[..self.cursor]);
        edited.push(c);
        edited.push_str(&value[self.cursor..]);
        self.cursor += c.len_utf8();
        edited
    }

    fn backspace(&mut self, value: &str) -> Option<String> {
        let start = self.prev_boundary(value)?;
        let edited = format!("{}{}", &value[..start], &value[self.cursor..]);
        self.cursor = start;
        Some(edited)
    }

    fn delete(&self, value: &str) -> Option<String> {
        let end = self.next_boundary(value)?;
        Some(format!("{}{}", &value[..self.cursor], &value[end..]))
    }
}

impl Component<Action> for LocationInput {
    type Props<'a> = LocationInputProps<'a>;

    fn handle_event<'a>(
        &mut self,
        event: &EventKind,
        props: Self::Props<'a>,
    ) -> Vec<Action>
    where
        'a: 'a,
    {
        if !props.is_focused {
            return vec![];
        }
        let EventKind::Key(key) = event else {
            return vec![];
        };

        let value = props.value;
        self.clamp_cursor(value);

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    vec![]
                }
                KeyCode::Char('e') => {
                    self.cursor = value.len();
                    vec![]
                }
                KeyCode::Char('u') => {
                    self.cursor = 0;
                    vec![Action::SetLocation(String::new())]
                }
                _ => vec![],
            };
        }

        match key.code {
            KeyCode::Char(c) => vec![Action::SetLocation(self.insert(value, c))],
            KeyCode::Backspace => self
                .backspace(value)
                .map(Action::SetLocation)
                .into_iter()
                .collect(),
            KeyCode::Delete => self
                .delete(value)
                .map(Action::SetLocation)
                .into_iter()
                .collect(),
            KeyCode::Left => {
                if let Some(pos) = self.prev_boundary(value) {
                    self.cursor = pos;
                }
                vec![]
            }
            KeyCode::Right => {
                if let Some(pos) = self.next_boundary(value) {
                    self.cursor = pos;
                }
                vec![]
            }
            KeyCode::Home => {
                self.cursor = 0;
                vec![]
            }
            KeyCode::End => {
                self.cursor = value.len();
                vec![]
            }
            KeyCode::Enter => vec![Action::ForecastFetch],
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: LocationInputProps<'_>) {
        self.clamp_cursor(props.value);

        let (text, text_style) = if props.value.is_empty() {
            (PLACEHOLDER, Style::default().fg(Color::DarkGray))
        } else {
            (props.value, Style::default())
        };
        let border_style = if props.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Location ");
        let inner = block.inner(area);
        frame.render_widget(Paragraph::new(text).style(text_style).block(block), area);

        if props.is_focused && inner.width > 0 && inner.height > 0 {
            let column = props.value[..self.cursor].chars().count() as u16;
            if column < inner.width {
                frame.set_cursor_position((inner.x + column, inner.y));
            }
        }
    }
}
