pub mod forecast_plot;
pub mod forecast_screen;
pub mod help_bar;
pub mod location_input;
pub mod readout;

// Re-export core Component trait
pub use plotcast::Component;

pub use forecast_plot::{point_index_at, ForecastPlot, ForecastPlotProps};
pub use forecast_screen::{ForecastScreen, ForecastScreenProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use location_input::{LocationInput, LocationInputProps, PLACEHOLDER};
pub use readout::{Readout, ReadoutProps, ERROR_ICON};
