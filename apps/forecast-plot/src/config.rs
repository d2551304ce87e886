//! Command line and forecast service configuration

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// Units requested from the service and shown in the UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Value of the `units` query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn format(&self, temp: f64) -> String {
        format!("{:.1}{}", temp, self.symbol())
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

/// Forecast plot - look up a 5-day forecast and plot its temperatures
#[derive(Parser, Debug)]
#[command(name = "forecast-plot")]
#[command(about = "Look up a 5-day forecast and plot the temperature series")]
pub struct Args {
    /// Location to load on start, e.g. "London,UK"
    #[arg(long, short)]
    pub location: Option<String>,

    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Forecast endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Units for temperatures
    #[arg(long, short, value_enum, default_value_t = Units::Metric)]
    pub units: Units,

    /// Write logs to this file (nothing is logged without it)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Everything the loader needs to build a request URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForecastConfig {
    pub endpoint: String,
    pub api_key: String,
    pub units: Units,
}

impl ForecastConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, units: Units) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            units,
        }
    }

    pub fn from_args(args: &Args) -> Self {
        Self::new(args.endpoint.trim(), args.api_key.trim(), args.units)
    }

    /// Request URL for `location`, with the query escaped.
    pub fn forecast_url(&self, location: &str) -> String {
        format!(
            "{}?q={}&APPID={}&units={}",
            self.endpoint,
            urlencoding::encode(location.trim()),
            urlencoding::encode(&self.api_key),
            self.units.as_query()
        )
    }
}
