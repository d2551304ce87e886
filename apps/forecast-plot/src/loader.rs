//! Async forecast loader
//!
//! One request per submission. The outcome becomes an ordered batch of
//! actions: either the five-step success sequence or a single
//! `LoadFailed`.

use std::sync::Arc;

use chrono::DateTime;
use serde::Deserialize;
use tracing::{info, warn};

use crate::action::{
    load_failed, set_data, set_dates, set_selected_date, set_selected_temp, set_temps, Action,
};
use crate::api::{ForecastSource, RawResponse};
use crate::error::LoadError;
use crate::state::{ForecastPayload, ForecastPoint};

/// Label format for points that only carry a unix timestamp.
const LABEL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A pending forecast load. Nothing happens until it is run or awaited.
pub struct LoadForecast<S> {
    source: Arc<S>,
    url: String,
}

/// Prepare a load of `url` through `source`.
pub fn load_forecast<S: ForecastSource>(source: Arc<S>, url: impl Into<String>) -> LoadForecast<S> {
    LoadForecast {
        source,
        url: url.into(),
    }
}

impl<S: ForecastSource> LoadForecast<S> {
    /// Fetch, then dispatch the resulting actions in order.
    pub async fn run(self, mut dispatch: impl FnMut(Action)) {
        for action in self.actions().await {
            dispatch(action);
        }
    }

    /// Fetch and return the actions to dispatch, in order.
    pub async fn actions(self) -> Vec<Action> {
        let outcome = match self.source.fetch(&self.url).await {
            Ok(raw) => parse_response(raw),
            Err(err) => Err(err),
        };

        match outcome.and_then(|payload| {
            let (dates, temps) = derive_series(&payload)?;
            Ok((payload, dates, temps))
        }) {
            Ok((payload, dates, temps)) => {
                info!(points = dates.len(), "Forecast loaded");
                vec![
                    set_data(payload),
                    set_dates(dates),
                    set_temps(temps),
                    set_selected_date(None),
                    set_selected_temp(None),
                ]
            }
            Err(err) => {
                warn!(error = %err, "Forecast load failed");
                vec![load_failed(err)]
            }
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Classify a response and parse a successful body.
pub fn parse_response(raw: RawResponse) -> Result<ForecastPayload, LoadError> {
    if !raw.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&raw.body)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| raw.body.trim().to_string());
        return Err(LoadError::Api {
            status: raw.status,
            message,
        });
    }

    let value: serde_json::Value = serde_json::from_str(&raw.body)
        .map_err(|err| LoadError::MalformedBody(err.to_string()))?;
    serde_json::from_value(value).map_err(|err| LoadError::UnexpectedShape(err.to_string()))
}

fn point_label(index: usize, point: &ForecastPoint) -> Result<String, LoadError> {
    if let Some(label) = &point.dt_txt {
        return Ok(label.clone());
    }
    let dt = point
        .dt
        .ok_or_else(|| LoadError::UnexpectedShape(format!("point {} has no timestamp", index)))?;
    DateTime::from_timestamp(dt, 0)
        .map(|time| time.format(LABEL_FORMAT).to_string())
        .ok_or_else(|| {
            LoadError::UnexpectedShape(format!("point {} has an out of range timestamp", index))
        })
}

/// Labels and temperatures of `payload.list`, in order and of equal length.
pub fn derive_series(payload: &ForecastPayload) -> Result<(Vec<String>, Vec<f64>), LoadError> {
    let mut dates = Vec::with_capacity(payload.list.len());
    let mut temps = Vec::with_capacity(payload.list.len());
    for (index, point) in payload.list.iter().enumerate() {
        dates.push(point_label(index, point)?);
        temps.push(point.main.temp);
    }
    Ok((dates, temps))
}
