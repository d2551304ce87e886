use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::state::AppState;

pub const ERROR_ICON: &str = "⚠ ";

pub struct ReadoutProps<'a> {
    pub state: &'a AppState,
}

/// City, current temperature and request status
pub struct Readout;

impl Readout {
    fn heading(state: &AppState) -> Line<'static> {
        let name = state
            .city()
            .map(|city| city.display_name())
            .or_else(|| state.last_query.clone())
            .unwrap_or_else(|| "No location".to_string());
        Line::from(Span::styled(name, Style::default().fg(Color::White).bold()))
    }

    fn temperature(state: &AppState) -> Line<'static> {
        let label = Span::styled("Temperature: ", Style::default().fg(Color::DarkGray));
        let Some(temp) = state.display_temp() else {
            return Line::from(vec![
                label,
                Span::styled("not loaded yet", Style::default().fg(Color::DarkGray)),
            ]);
        };

        let when = if state.selected.temp.is_some() {
            state.selected.date.clone()
        } else {
            state.dates.first().cloned()
        };
        let mut spans = vec![
            label,
            Span::styled(state.units.format(temp), Style::default().fg(Color::Yellow).bold()),
        ];
        if let Some(when) = when {
            spans.push(Span::styled(
                format!("  at {}", when),
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    }

    fn status(state: &AppState) -> Line<'static> {
        if state.is_loading {
            let query = state.pending_query.as_deref().unwrap_or_default();
            return Line::from(Span::styled(
                format!("Loading forecast for {}...", query),
                Style::default().fg(Color::Cyan),
            ));
        }
        match &state.error {
            Some(error) => Line::from(Span::styled(
                format!("{}{}: {}", ERROR_ICON, error.kind(), error),
                Style::default().fg(Color::Red),
            )),
            None => Line::default(),
        }
    }
}

impl Component<Action> for Readout {
    type Props<'a> = ReadoutProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: ReadoutProps<'_>) {
        let state = props.state;
        let lines = vec![
            Self::heading(state),
            Self::temperature(state),
            Self::status(state),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use plotcast::testing::RenderHarness;

    fn render(state: &AppState) -> String {
        let mut harness = RenderHarness::new(70, 3);
        harness.render_to_string_plain(|frame| {
            Readout.render(frame, frame.area(), ReadoutProps { state })
        })
    }

    #[test]
    fn test_not_loaded_yet() {
        let output = render(&AppState::default());
        assert!(output.contains("No location"));
        assert!(output.contains("not loaded yet"));
    }

    #[test]
    fn test_first_point_then_selection() {
        let mut state = AppState::default();
        state.dates = vec!["2024-01-01 00:00:00".into(), "2024-01-01 03:00:00".into()];
        state.temps = vec![3.0, 4.5];

        let output = render(&state);
        assert!(output.contains("3.0°C"));
        assert!(output.contains("at 2024-01-01 00:00:00"));

        state.selected.date = Some("2024-01-01 03:00:00".into());
        state.selected.temp = Some(4.5);
        let output = render(&state);
        assert!(output.contains("4.5°C"));
        assert!(output.contains("at 2024-01-01 03:00:00"));
    }

    #[test]
    fn test_loading_and_error_lines() {
        let mut state = AppState::default();
        state.is_loading = true;
        state.last_query = Some("Lima,PE".into());
        state.pending_query = Some("Oslo,NO".into());
        let output = render(&state);
        assert!(output.contains("Loading forecast for Oslo,NO..."));
        assert!(output.contains("Lima,PE"), "heading keeps the loaded query");

        state.is_loading = false;
        state.error = Some(LoadError::Api {
            status: 404,
            message: "city not found".into(),
        });
        let output = render(&state);
        assert!(output.contains("service error"));
        assert!(output.contains("city not found"));
    }
}
