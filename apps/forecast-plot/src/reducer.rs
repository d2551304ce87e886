//! Reducer - pure function: (state, action) -> state
//!
//! - fn(state: &mut AppState, action: Action) -> DispatchResult<Effect>
//! - `changed` is false when the action leaves the state value-equal, in
//!   which case the store keeps publishing the same snapshot
//! - No side effects here; async work is requested through [`Effect`]

use plotcast::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, Selection};

/// Replace `slot` with `value` unless they are already equal.
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

fn select(state: &mut AppState, index: usize) -> bool {
    let Some((date, temp)) = state.series().nth(index).map(|(d, t)| (d.to_string(), t)) else {
        return false;
    };
    replace(
        &mut state.selected,
        Selection {
            date: Some(date),
            temp: Some(temp),
        },
    )
}

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Data updates =====
        Action::SetLocation(location) => {
            DispatchResult::changed_if(replace(&mut state.location, location))
        }

        Action::SetData(payload) => {
            let same_payload = state
                .forecast_data
                .as_ref()
                .is_some_and(|current| current == &payload);
            let mut changed = false;
            if !same_payload {
                state.forecast_data = Some(payload);
                changed = true;
            }
            if let Some(query) = state.pending_query.take() {
                state.last_query = Some(query);
                changed = true;
            }
            changed |= replace(&mut state.is_loading, false);
            changed |= replace(&mut state.error, None);
            DispatchResult::changed_if(changed)
        }

        Action::SetDates(dates) => DispatchResult::changed_if(replace(&mut state.dates, dates)),

        Action::SetTemps(temps) => DispatchResult::changed_if(replace(&mut state.temps, temps)),

        Action::SetSelectedDate(date) => {
            DispatchResult::changed_if(replace(&mut state.selected.date, date))
        }

        Action::SetSelectedTemp(temp) => {
            DispatchResult::changed_if(replace(&mut state.selected.temp, temp))
        }

        Action::SelectPoint { date, temp } => DispatchResult::changed_if(replace(
            &mut state.selected,
            Selection {
                date: Some(date),
                temp: Some(temp),
            },
        )),

        // ===== Loading =====
        Action::ForecastFetch => {
            let query = state.location.trim().to_string();
            if query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.request_id += 1;
            state.is_loading = true;
            state.error = None;
            state.pending_query = Some(query.clone());
            DispatchResult::changed_with(Effect::LoadForecast {
                query,
                request: state.request_id,
            })
        }

        Action::ForecastDidLoad { request, actions } => {
            if request != state.request_id || state.pending_query.is_none() {
                return DispatchResult::unchanged();
            }
            let mut result = DispatchResult::unchanged();
            for action in actions {
                let step = reducer(state, action);
                result.changed |= step.changed;
                result.effects.extend(step.effects);
            }
            result
        }

        Action::LoadFailed(error) => {
            let mut changed = replace(&mut state.is_loading, false);
            changed |= replace(&mut state.pending_query, None);
            changed |= replace(&mut state.error, Some(error));
            DispatchResult::changed_if(changed)
        }

        // ===== UI =====
        Action::UiFocusNext => {
            state.focus = state.focus.toggle();
            DispatchResult::changed()
        }

        Action::UiSelectNext => {
            let len = state.point_count();
            if len == 0 {
                return DispatchResult::unchanged();
            }
            let next = state.selected_index().map_or(0, |i| (i + 1) % len);
            DispatchResult::changed_if(select(state, next))
        }

        Action::UiSelectPrev => {
            let len = state.point_count();
            if len == 0 {
                return DispatchResult::unchanged();
            }
            let prev = state
                .selected_index()
                .map_or(len - 1, |i| (i + len - 1) % len);
            DispatchResult::changed_if(select(state, prev))
        }

        Action::UiSelectClear => {
            DispatchResult::changed_if(replace(&mut state.selected, Selection::default()))
        }

        // Quit is handled by the runtime
        Action::Quit => DispatchResult::unchanged(),
    }
}
