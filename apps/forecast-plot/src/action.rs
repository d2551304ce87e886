//! Actions and their creators
//!
//! Categories are inferred from the names:
//! - `forecast`: ForecastFetch, ForecastDidLoad
//! - `ui`: UiFocusNext, UiSelectNext, UiSelectPrev, UiSelectClear
//! - uncategorized: the `Set*` updates, SelectPoint, LoadFailed, Quit

use std::sync::Arc;

use plotcast::ActionSummary;

use crate::error::LoadError;
use crate::state::ForecastPayload;

#[derive(plotcast::Action, Clone, Debug, PartialEq)]
#[action(infer_categories)]
pub enum Action {
    /// Replace the typed query.
    SetLocation(String),

    /// Replace the stored payload. Also ends the loading state.
    SetData(Arc<ForecastPayload>),

    SetDates(Vec<String>),

    SetTemps(Vec<f64>),

    SetSelectedDate(Option<String>),

    SetSelectedTemp(Option<f64>),

    /// Select one plotted point; both fields change in a single transition.
    SelectPoint { date: String, temp: f64 },

    /// The loader gave up on the current request.
    LoadFailed(LoadError),

    /// Intent: submit the current location (triggers the loader).
    ForecastFetch,

    /// The loader's actions for request `request`, applied only if that
    /// request is still the one in flight.
    ForecastDidLoad { request: u64, actions: Vec<Action> },

    /// Move key focus between the input and the plot.
    UiFocusNext,

    UiSelectNext,

    UiSelectPrev,

    UiSelectClear,

    Quit,
}

pub fn set_location(location: impl Into<String>) -> Action {
    Action::SetLocation(location.into())
}

pub fn set_data(payload: impl Into<Arc<ForecastPayload>>) -> Action {
    Action::SetData(payload.into())
}

pub fn set_dates(dates: Vec<String>) -> Action {
    Action::SetDates(dates)
}

pub fn set_temps(temps: Vec<f64>) -> Action {
    Action::SetTemps(temps)
}

pub fn set_selected_date(date: Option<String>) -> Action {
    Action::SetSelectedDate(date)
}

pub fn set_selected_temp(temp: Option<f64>) -> Action {
    Action::SetSelectedTemp(temp)
}

pub fn select_point(date: impl Into<String>, temp: f64) -> Action {
    Action::SelectPoint {
        date: date.into(),
        temp,
    }
}

pub fn load_failed(error: LoadError) -> Action {
    Action::LoadFailed(error)
}

/// Keep log lines short for the data-carrying variants.
impl ActionSummary for Action {
    fn summary(&self) -> String {
        match self {
            Action::SetData(payload) => format!(
                "SetData {{ points: {}, city: {:?} }}",
                payload.list.len(),
                payload.city.as_ref().map(|c| c.name.as_str())
            ),
            Action::SetDates(dates) => format!(
                "SetDates {{ len: {}, first: {:?} }}",
                dates.len(),
                dates.first()
            ),
            Action::SetTemps(temps) => format!(
                "SetTemps {{ len: {}, first: {:?} }}",
                temps.len(),
                temps.first()
            ),
            Action::LoadFailed(error) => format!("LoadFailed({})", error.kind()),
            Action::ForecastDidLoad { request, actions } => format!(
                "ForecastDidLoad {{ request: {}, actions: {:?} }}",
                request,
                actions.iter().map(plotcast::Action::name).collect::<Vec<_>>()
            ),
            _ => format!("{:?}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotcast::{Action as _, ActionCategory as _};

    #[test]
    fn test_creators_build_matching_variants() {
        assert_eq!(set_location("Paris,FR"), Action::SetLocation("Paris,FR".into()));
        assert_eq!(set_selected_date(None), Action::SetSelectedDate(None));
        assert_eq!(set_selected_temp(Some(12.0)), Action::SetSelectedTemp(Some(12.0)));
        assert_eq!(
            select_point("Mon", 12.0),
            Action::SelectPoint {
                date: "Mon".into(),
                temp: 12.0
            }
        );
    }

    #[test]
    fn test_names_and_categories() {
        assert_eq!(Action::ForecastFetch.name(), "ForecastFetch");
        assert_eq!(set_dates(vec![]).name(), "SetDates");
        assert!(Action::ForecastFetch.is_forecast());
        assert!(Action::UiSelectNext.is_ui());
        assert_eq!(Action::Quit.category(), None);
        assert_eq!(
            Action::UiFocusNext.category_enum(),
            ActionCategory::Ui
        );
    }

    #[test]
    fn test_summary_is_compact() {
        let action = set_temps(vec![1.0; 40]);
        assert_eq!(action.summary(), "SetTemps { len: 40, first: Some(1.0) }");
        assert_eq!(Action::Quit.summary(), "Quit");

        let batch = Action::ForecastDidLoad {
            request: 3,
            actions: vec![set_dates(vec![]), load_failed(LoadError::Transport("x".into()))],
        };
        assert!(batch.is_forecast());
        assert_eq!(
            batch.summary(),
            r#"ForecastDidLoad { request: 3, actions: ["SetDates", "LoadFailed"] }"#
        );
    }
}
