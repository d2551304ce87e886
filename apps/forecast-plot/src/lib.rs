//! Forecast plot - look up a 5-day forecast and plot it in the terminal
//!
//! 1. Event (keyboard/mouse) -> Component.handle_event() -> Actions
//! 2. Actions dispatched to the effect store
//! 3. Reducer produces the next state snapshot and declares effects
//! 4. Effects spawn the loader on the task manager
//! 5. The loader's actions come back through the same queue

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod error;
pub mod loader;
pub mod reducer;
pub mod state;

pub use action::Action;
pub use api::{ForecastSource, HttpForecastSource, RawResponse};
pub use config::{Args, ForecastConfig, Units};
pub use effect::{handle_effect, Effect};
pub use error::LoadError;
pub use loader::{derive_series, load_forecast, parse_response, LoadForecast};
pub use reducer::reducer;
pub use state::{AppState, Focus, ForecastPayload, Selection};
