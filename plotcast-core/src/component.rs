//! Component trait shared by the input, plot and readout widgets

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A widget that draws from props and answers events with actions
///
/// Props borrow the current state snapshot, so a component sees exactly what
/// the store last published. Anything a component wants changed goes out as
/// an action; `&mut self` is only for view bookkeeping such as a text
/// cursor or the rect of the last drawn chart, which later clicks are
/// hit-tested against.
///
/// # Example
///
/// ```ignore
/// use plotcast::{Component, EventKind, Frame, Rect};
///
/// struct UnitsToggle;
///
/// struct UnitsToggleProps {
///     metric: bool,
/// }
///
/// impl Component<AppAction> for UnitsToggle {
///     type Props<'a> = UnitsToggleProps;
///
///     fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> Vec<AppAction> {
///         match event {
///             EventKind::Key(key) if key.code == KeyCode::Char('u') => {
///                 vec![AppAction::SetMetric(!props.metric)]
///             }
///             _ => vec![],
///         }
///     }
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
///         let label = if props.metric { "°C" } else { "°F" };
///         frame.render_widget(Paragraph::new(label), area);
///     }
/// }
/// ```
pub trait Component<A> {
    /// Borrowed view of the state this component reads
    type Props<'a>;

    /// Map an event to actions, in dispatch order
    ///
    /// Implementations may name a concrete collection such as `Vec<A>` so
    /// callers and tests can inspect it. Display-only widgets like a readout
    /// keep the default, which emits nothing.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Draw into `area`
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
