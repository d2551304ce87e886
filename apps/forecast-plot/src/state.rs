//! Application state - single source of truth
//!
//! Components receive `&AppState` as props; only the reducer changes it, and
//! it does so on a private copy that the store publishes as a new snapshot.

use std::sync::Arc;

use serde::Deserialize;

use crate::config::Units;
use crate::error::LoadError;

/// Parsed 5-day forecast response.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ForecastPayload {
    pub list: Vec<ForecastPoint>,
    #[serde(default)]
    pub city: Option<City>,
}

/// One entry of the forecast list (3-hour step).
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ForecastPoint {
    /// Unix seconds.
    #[serde(default)]
    pub dt: Option<i64>,
    #[serde(default)]
    pub dt_txt: Option<String>,
    pub main: Readings,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Readings {
    pub temp: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct City {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
}

impl City {
    pub fn display_name(&self) -> String {
        match &self.country {
            Some(country) if !country.is_empty() => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        }
    }
}

/// The point picked on the plot. Both fields are `None` when nothing is picked.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    pub date: Option<String>,
    pub temp: Option<f64>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.temp.is_none()
    }
}

/// Which widget receives key events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Input,
    Plot,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Input => Focus::Plot,
            Focus::Plot => Focus::Input,
        }
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    /// Query text as typed ("City,Country")
    pub location: String,

    /// Last successfully parsed payload
    pub forecast_data: Option<Arc<ForecastPayload>>,

    /// Timestamp labels, parallel to `temps`
    pub dates: Vec<String>,

    /// Temperatures, parallel to `dates`
    pub temps: Vec<f64>,

    pub selected: Selection,

    /// A forecast request is in flight
    pub is_loading: bool,

    /// Last load failure
    pub error: Option<LoadError>,

    pub units: Units,

    pub focus: Focus,

    /// Query of the last successful load, used as the plot caption
    pub last_query: Option<String>,

    /// Query of the request in flight
    pub pending_query: Option<String>,

    /// Bumped on every submission; only the matching result is applied
    pub request_id: u64,
}

impl AppState {
    pub fn new(units: Units) -> Self {
        Self {
            location: String::new(),
            forecast_data: None,
            dates: Vec::new(),
            temps: Vec::new(),
            selected: Selection::default(),
            is_loading: false,
            error: None,
            units,
            focus: Focus::default(),
            last_query: None,
            pending_query: None,
            request_id: 0,
        }
    }

    /// `(label, temp)` pairs. Stops at the shorter of the two sequences.
    pub fn series(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.dates
            .iter()
            .map(String::as_str)
            .zip(self.temps.iter().copied())
    }

    pub fn point_count(&self) -> usize {
        self.dates.len().min(self.temps.len())
    }

    /// Index of the selected point, if the selection matches one.
    pub fn selected_index(&self) -> Option<usize> {
        let date = self.selected.date.as_deref()?;
        self.series().position(|(label, temp)| {
            label == date && self.selected.temp.is_none_or(|t| t == temp)
        })
    }

    /// Temperature shown in the readout: the selection, else the first point.
    pub fn display_temp(&self) -> Option<f64> {
        self.selected
            .temp
            .or_else(|| self.series().next().map(|(_, temp)| temp))
    }

    pub fn city(&self) -> Option<&City> {
        self.forecast_data.as_ref()?.city.as_ref()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Units::default())
    }
}
