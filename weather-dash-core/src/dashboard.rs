//! Application state and the user actions that drive it.
//!
//! Every action runs the same two-stage pipeline: resolve the location
//! (current conditions + coordinates), then fetch and reduce the forecast for
//! those coordinates. Success replaces the displayed data wholesale; failure
//! only touches the error slot.

use chrono::{Local, NaiveDate, TimeZone, Utc};
use tracing::{debug, info};

use crate::{
    config::DEFAULT_CITY,
    error::DashboardError,
    forecast::reduce,
    geolocation::Geolocator,
    model::{CurrentConditions, DailyForecast, LocationQuery},
    preference::{PreferenceStore, save_dark_mode},
    provider::WeatherProvider,
    resolver::{Resolution, resolve},
};

/// Everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    /// Search text; also updated with the resolved name after "use my location".
    pub city: String,
    pub conditions: Option<CurrentConditions>,
    pub forecast: Vec<DailyForecast>,
    pub error: Option<String>,
    pub loading: bool,
    pub dark_mode: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY.to_string(),
            conditions: None,
            forecast: Vec::new(),
            error: None,
            loading: false,
            dark_mode: false,
        }
    }
}

/// Output of a completed pipeline run.
struct Loaded {
    resolution: Resolution,
    forecast: Vec<DailyForecast>,
}

#[derive(Debug)]
pub struct Dashboard<P, Tz: TimeZone = Local> {
    provider: P,
    tz: Tz,
    state: DashboardState,
}

impl<P: WeatherProvider> Dashboard<P, Local> {
    /// Dashboard dating forecasts in the viewer's local time zone.
    pub fn new(provider: P, city: impl Into<String>, dark_mode: bool) -> Self {
        Self::with_time_zone(provider, Local, city, dark_mode)
    }
}

impl<P: WeatherProvider, Tz: TimeZone> Dashboard<P, Tz> {
    pub fn with_time_zone(provider: P, tz: Tz, city: impl Into<String>, dark_mode: bool) -> Self {
        Self {
            provider,
            tz,
            state: DashboardState {
                city: city.into(),
                dark_mode,
                ..DashboardState::default()
            },
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn set_city(&mut self, city: impl Into<String>) {
        self.state.city = city.into();
    }

    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }

    /// Search for the current city text.
    pub async fn search(&mut self) -> &DashboardState {
        let query = match LocationQuery::by_name(&self.state.city) {
            Ok(query) => query,
            Err(err) => {
                // Validation failures never reach the network.
                self.state.error = Some(err.user_message());
                return &self.state;
            }
        };

        self.state.loading = true;
        self.state.error = None;
        let result = self.load(&query).await;
        self.finish(result, false)
    }

    /// Re-run the last search with the same city text.
    pub async fn refresh(&mut self) -> &DashboardState {
        self.search().await
    }

    /// Acquire the device position and load weather for it.
    pub async fn use_my_location(&mut self, geolocator: &dyn Geolocator) -> &DashboardState {
        let at = match geolocator.locate().await {
            Ok(at) => at,
            Err(err) => {
                self.state.error = Some(DashboardError::from(err).user_message());
                return &self.state;
            }
        };

        debug!("Device location: {at}");
        self.state.loading = true;
        self.state.error = None;
        let result = self.load(&LocationQuery::ByCoordinates(at)).await;
        self.finish(result, true)
    }

    /// Flip the theme and persist it right away.
    pub fn toggle_dark_mode(&mut self, store: &mut dyn PreferenceStore) -> anyhow::Result<bool> {
        self.state.dark_mode = !self.state.dark_mode;
        save_dark_mode(store, self.state.dark_mode)?;
        Ok(self.state.dark_mode)
    }

    async fn load(&self, query: &LocationQuery) -> Result<Loaded, DashboardError> {
        let resolution = resolve(&self.provider, query).await?;
        let samples = self.provider.forecast(resolution.coordinates()).await?;
        let forecast = reduce(&samples, self.today(), &self.tz);
        Ok(Loaded { resolution, forecast })
    }

    fn finish(&mut self, result: Result<Loaded, DashboardError>, adopt_name: bool) -> &DashboardState {
        self.state.loading = false;

        match result {
            Ok(Loaded { resolution, forecast }) => {
                info!(
                    "Loaded weather for {} ({} forecast days)",
                    resolution.name(),
                    forecast.len()
                );
                if adopt_name {
                    self.state.city = resolution.name().to_string();
                }
                self.state.conditions = Some(resolution.conditions);
                self.state.forecast = forecast;
                self.state.error = None;
            }
            Err(err) => {
                // Previously displayed data stays as it was.
                self.state.error = Some(err.user_message());
            }
        }

        &self.state
    }
}
