//! Scatter plot of the temperature series
//!
//! x is the point index, y the temperature. The last rendered graph area is
//! kept so mouse clicks can be mapped back to a point.

use crossterm::event::{KeyCode, MouseButton, MouseEventKind};
use plotcast::{Component, EventKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    symbols::Marker,
    text::Line,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};

use crate::action::Action;
use crate::state::AppState;

pub struct ForecastPlotProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct ForecastPlot {
    /// Widget area from the last render
    area: Option<Rect>,
    /// Plotting area inside the axes from the last render
    graph: Option<Rect>,
}

/// Nearest point index for a click at `column` inside `graph`.
///
/// Points are spread evenly from the left to the right edge of the graph.
/// Columns outside the graph clamp to the first or last point.
pub fn point_index_at(graph: Rect, column: u16, len: usize) -> Option<usize> {
    if len == 0 || graph.width == 0 {
        return None;
    }
    if len == 1 || graph.width == 1 {
        return Some(0);
    }
    let offset = column.clamp(graph.left(), graph.right() - 1) - graph.left();
    let fraction = f64::from(offset) / f64::from(graph.width - 1);
    let index = (fraction * (len - 1) as f64).round() as usize;
    Some(index.min(len - 1))
}

/// Compact axis label: "2024-01-01 12:00:00" becomes "01-01 12:00".
fn short_label(label: &str) -> &str {
    label.get(5..16).unwrap_or(label)
}

fn temp_bounds(temps: &[f64]) -> [f64; 2] {
    let (min, max) = temps
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &t| {
            (lo.min(t), hi.max(t))
        });
    if min >= max {
        [min - 1.0, max + 1.0]
    } else {
        [min.floor(), max.ceil()]
    }
}

impl ForecastPlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn point_at(&self, state: &AppState, column: u16, row: u16) -> Option<Action> {
        let area = self.area?;
        if !area.contains((column, row).into()) {
            return None;
        }
        let index = point_index_at(self.graph?, column, state.point_count())?;
        let (date, temp) = state.series().nth(index)?;
        Some(Action::SelectPoint {
            date: date.to_string(),
            temp,
        })
    }
}

impl Component<Action> for ForecastPlot {
    type Props<'a> = ForecastPlotProps<'a>;

    fn handle_event<'a>(
        &mut self,
        event: &EventKind,
        props: Self::Props<'a>,
    ) -> Vec<Action>
    where
        'a: 'a,
    {
        match event {
            EventKind::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => self
                .point_at(props.state, mouse.column, mouse.row)
                .into_iter()
                .collect(),
            EventKind::Key(key) if props.is_focused => match key.code {
                KeyCode::Right | KeyCode::Char('l') => vec![Action::UiSelectNext],
                KeyCode::Left | KeyCode::Char('h') => vec![Action::UiSelectPrev],
                KeyCode::Char('c') => vec![Action::UiSelectClear],
                KeyCode::Char('r') => vec![Action::ForecastFetch],
                _ => vec![],
            },
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: ForecastPlotProps<'_>) {
        let state = props.state;
        self.area = Some(area);
        self.graph = None;

        let title = match &state.last_query {
            Some(query) => format!(" Forecast: {} ({}) ", query, state.units.symbol()),
            None => " Forecast ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if props.is_focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            })
            .title(title);
        let inner = block.inner(area);

        let points: Vec<(f64, f64)> = state
            .series()
            .enumerate()
            .map(|(i, (_, temp))| (i as f64, temp))
            .collect();

        if points.is_empty() {
            let message = if state.is_loading {
                "Loading forecast..."
            } else {
                "No forecast loaded. Type a location and press Enter."
            };
            let paragraph = Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let temps: Vec<f64> = points.iter().map(|&(_, t)| t).collect();
        let [low, high] = temp_bounds(&temps);
        let y_labels: Vec<String> = vec![
            format!("{:.0}", low),
            format!("{:.0}", (low + high) / 2.0),
            format!("{:.0}", high),
        ];
        let y_label_width = y_labels.iter().map(|l| l.len()).max().unwrap_or(0) as u16;

        let x_max = (points.len() - 1).max(1) as f64;
        let first = state.dates.first().map(|d| short_label(d)).unwrap_or("");
        let last = state
            .dates
            .get(points.len() - 1)
            .map(|d| short_label(d))
            .unwrap_or("");

        let selected: Vec<(f64, f64)> = state
            .selected_index()
            .and_then(|i| points.get(i).copied())
            .into_iter()
            .collect();

        let mut datasets = vec![Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Cyan))
            .data(&points)];
        if !selected.is_empty() {
            datasets.push(
                Dataset::default()
                    .marker(Marker::Block)
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(Color::Yellow).bold())
                    .data(&selected),
            );
        }

        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([0.0, x_max])
                    .labels_alignment(Alignment::Right)
                    .labels(vec![Line::from(first), Line::from(last)]),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([low, high])
                    .labels(y_labels),
            );
        frame.render_widget(chart, area);

        // Mirrors the chart layout: y labels, one column of axis, then the
        // graph; the bottom two rows hold the x axis and its labels.
        let left = y_label_width.min(inner.width / 3) + 1;
        self.graph = Some(Rect {
            x: inner.x + left.min(inner.width),
            y: inner.y,
            width: inner.width.saturating_sub(left),
            height: inner.height.saturating_sub(2),
        });
    }
}
