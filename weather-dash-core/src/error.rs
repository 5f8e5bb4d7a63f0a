use thiserror::Error;

pub const VALIDATION_MESSAGE: &str = "Please enter a city name.";
pub const FETCH_FALLBACK_MESSAGE: &str = "Failed to fetch weather";

/// Device location failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Geolocation not available")]
    Unavailable,
    #[error("Geolocation is not supported on this device.")]
    Unsupported,
}

/// Everything a dashboard action can fail with. The `Display` output is the
/// message shown to the user.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    Upstream {
        message: String,
        status: Option<u16>,
    },

    #[error(transparent)]
    Geolocation(#[from] GeolocationError),
}

impl DashboardError {
    pub fn validation() -> Self {
        Self::Validation {
            message: VALIDATION_MESSAGE.to_string(),
        }
    }

    /// Upstream failure, preferring the API-reported message when it has one.
    pub fn upstream(reported: Option<String>, status: Option<u16>) -> Self {
        let message = reported
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| FETCH_FALLBACK_MESSAGE.to_string());
        Self::Upstream { message, status }
    }

    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        tracing::warn!("request failed: {err}");
        Self::upstream(None, err.status().map(|s| s.as_u16()))
    }
}
