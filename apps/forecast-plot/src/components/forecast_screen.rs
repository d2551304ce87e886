//! Whole-screen composition and event routing
//!
//! Global keys (quit, focus switch) are handled here. Mouse events always go
//! to the plot; other keys go to whichever widget has focus.

use crossterm::event::{KeyCode, KeyModifiers};
use plotcast::EventKind;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

use super::{
    Component, ForecastPlot, ForecastPlotProps, HelpBar, HelpBarProps, LocationInput,
    LocationInputProps, Readout, ReadoutProps,
};
use crate::action::Action;
use crate::state::{AppState, Focus};

pub struct ForecastScreenProps<'a> {
    pub state: &'a AppState,
}

#[derive(Default)]
pub struct ForecastScreen {
    input: LocationInput,
    plot: ForecastPlot,
}

impl ForecastScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn global_action(event: &EventKind) -> Option<Action> {
        let EventKind::Key(key) = event else {
            return None;
        };
        match key.code {
            KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Quit)
            }
            KeyCode::Tab | KeyCode::BackTab => Some(Action::UiFocusNext),
            _ => None,
        }
    }
}

impl Component<Action> for ForecastScreen {
    type Props<'a> = ForecastScreenProps<'a>;

    fn handle_event<'a>(
        &mut self,
        event: &EventKind,
        props: Self::Props<'a>,
    ) -> Vec<Action>
    where
        'a: 'a,
    {
        if let Some(action) = Self::global_action(event) {
            return vec![action];
        }

        let state = props.state;
        let plot_props = ForecastPlotProps {
            state,
            is_focused: state.focus == Focus::Plot,
        };
        if matches!(event, EventKind::Mouse(_)) || state.focus == Focus::Plot {
            return self.plot.handle_event(event, plot_props);
        }

        self.input.handle_event(
            event,
            LocationInputProps {
                value: &state.location,
                is_focused: true,
            },
        )
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: ForecastScreenProps<'_>) {
        let state = props.state;
        let [input_area, readout_area, plot_area, help_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .areas(area);

        self.input.render(
            frame,
            input_area,
            LocationInputProps {
                value: &state.location,
                is_focused: state.focus == Focus::Input,
            },
        );
        Readout.render(frame, readout_area, ReadoutProps { state });
        self.plot.render(
            frame,
            plot_area,
            ForecastPlotProps {
                state,
                is_focused: state.focus == Focus::Plot,
            },
        );
        HelpBar.render(frame, help_area, HelpBarProps { focus: state.focus });
    }
}
