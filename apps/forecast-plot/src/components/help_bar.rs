use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::state::Focus;

pub struct HelpBar;

pub struct HelpBarProps {
    pub focus: Focus,
}

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let hints: &[(&str, &str)] = match props.focus {
            Focus::Input => &[("enter", "load"), ("tab", "plot"), ("esc", "quit")],
            Focus::Plot => &[
                ("←/→", "select"),
                ("click", "pick"),
                ("c", "clear"),
                ("r", "reload"),
                ("tab", "input"),
                ("esc", "quit"),
            ],
        };
        let spans: Vec<Span> = hints
            .iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(format!(" {}", key), Style::default().fg(Color::Cyan).bold()),
                    Span::styled(format!(" {} ", label), Style::default().fg(Color::DarkGray)),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}
