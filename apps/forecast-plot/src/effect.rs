//! Effects - side effects declared by the reducer
//!
//! The reducer stays pure; [`handle_effect`] turns these into tasks.

use std::sync::Arc;

use plotcast::EffectContext;
use tracing::debug;

use crate::action::Action;
use crate::api::ForecastSource;
use crate::config::ForecastConfig;
use crate::loader::load_forecast;

/// Task key for the forecast loader. A newer load replaces an older one;
/// a result that was already queued is dropped by the reducer.
pub const FORECAST_TASK: &str = "forecast";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch and load the forecast for a location query
    LoadForecast { query: String, request: u64 },
}

/// Run an effect against the configured forecast source.
pub fn handle_effect<S: ForecastSource>(
    effect: Effect,
    ctx: &mut EffectContext<Action>,
    config: &ForecastConfig,
    source: &Arc<S>,
) {
    match effect {
        Effect::LoadForecast { query, request } => {
            debug!(%query, request, "Starting forecast load");
            let load = load_forecast(Arc::clone(source), config.forecast_url(&query));
            ctx.tasks().spawn(FORECAST_TASK, async move {
                Action::ForecastDidLoad {
                    request,
                    actions: load.actions().await,
                }
            });
        }
    }
}
