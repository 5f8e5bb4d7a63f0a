use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// Latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// What the user asked for: a typed city or a device-reported position.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    ByName(String),
    ByCoordinates(Coordinates),
}

impl LocationQuery {
    /// Build a name query, rejecting empty or whitespace-only text.
    pub fn by_name(text: &str) -> Result<Self, DashboardError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DashboardError::validation());
        }
        Ok(Self::ByName(trimmed.to_string()))
    }

    pub fn by_coordinates(latitude: f64, longitude: f64) -> Self {
        Self::ByCoordinates(Coordinates::new(latitude, longitude))
    }
}

/// Weather-condition descriptor as reported by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub code: u32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

impl Default for Condition {
    fn default() -> Self {
        Self {
            code: 0,
            main: "Unknown".to_string(),
            description: "unknown".to_string(),
            icon: "01d".to_string(),
        }
    }
}

/// Snapshot of "now" at a resolved location. Replaced wholesale on each fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub name: String,
    pub country: String,
    pub coordinates: Coordinates,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub pressure_hpa: u32,
    pub condition: Condition,
}

/// One raw three-hour slice of the forecast endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: i64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub condition: Condition,
}

impl ForecastSample {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

/// Per-day summary, taken from the first sample seen for that local date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub timestamp: i64,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
    pub description: String,
    pub icon: String,
}
