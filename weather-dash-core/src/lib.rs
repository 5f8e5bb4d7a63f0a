//! Core library for the `weather-dash` terminal dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the `WeatherProvider` seam
//! - Location resolution and forecast reduction
//! - Dashboard state, user actions and the persisted theme preference
//!
//! It is used by `weather-dash-cli`, but can also be reused by other front ends.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod geolocation;
pub mod icon;
pub mod model;
pub mod preference;
pub mod provider;
pub mod resolver;

pub use config::Config;
pub use dashboard::{Dashboard, DashboardState};
pub use error::{DashboardError, GeolocationError};
pub use forecast::{MAX_DAYS, reduce};
pub use geolocation::{FixedLocation, Geolocator};
pub use icon::{IconSize, icon_url};
pub use model::{
    Condition, Coordinates, CurrentConditions, DailyForecast, ForecastSample, LocationQuery,
};
pub use preference::{FilePreferences, PreferenceStore, load_dark_mode, save_dark_mode};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use resolver::{Resolution, resolve};
